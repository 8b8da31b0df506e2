//! Enumerated value sets for constrained options.
//!
//! Each [`Registry`] names one option family (distance units, execution
//! hints, rewrite methods, ...) and the tokens the engine accepts for it.
//! Registries are immutable statics; validators in [`crate::validate`]
//! check candidate values against them.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// How a registry compares a candidate with its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Tokens must match exactly (`NM` and `nm` differ).
    Sensitive,
    /// Candidates are lower-cased before comparison and stored lower-cased.
    Insensitive,
}

/// Structural matcher for open-ended token families such as `top_terms_N`.
#[derive(Debug, Clone, Copy)]
pub struct TokenPattern {
    /// Human-facing description used in error messages.
    pub description: &'static str,
    /// Returns `true` when a normalized token matches the family.
    pub matches: fn(&str) -> bool,
}

/// A static set of allowed tokens for one option family.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    /// Family name, e.g. `"distance unit"`.
    pub name: &'static str,
    /// Allowed tokens in their canonical spelling.
    pub tokens: &'static [&'static str],
    /// Comparison policy.
    pub case: Case,
    /// Additional structural family accepted besides the listed tokens.
    pub pattern: Option<TokenPattern>,
}

impl Registry {
    /// Normalizes a candidate according to the registry's case policy.
    pub fn normalize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        match self.case {
            Case::Sensitive => Cow::Borrowed(token),
            Case::Insensitive if token.chars().any(char::is_uppercase) => {
                Cow::Owned(token.to_lowercase())
            }
            Case::Insensitive => Cow::Borrowed(token),
        }
    }

    /// Returns `true` if the already-normalized token is a listed member.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&token)
    }

    /// Returns `true` if the already-normalized token is a member or
    /// matches the registry's pattern.
    pub fn accepts(&self, token: &str) -> bool {
        self.contains(token) || self.pattern.is_some_and(|p| (p.matches)(token))
    }
}

/// Units accepted by distance-based aggregations and queries.
pub static DISTANCE_UNITS: Registry = Registry {
    name: "distance unit",
    tokens: &[
        "in",
        "inch",
        "yd",
        "yards",
        "ft",
        "feet",
        "km",
        "kilometers",
        "NM",
        "nmi",
        "nauticalmiles",
        "mm",
        "millimeters",
        "cm",
        "centimeters",
        "mi",
        "miles",
        "m",
        "meters",
    ],
    case: Case::Sensitive,
    pattern: None,
};

/// Execution hints for the diversified sampler aggregation.
pub static EXECUTION_HINTS: Registry = Registry {
    name: "execution hint",
    tokens: &[
        "map",
        "global_ordinals",
        "global_ordinals_hash",
        "global_ordinals_low_cardinality",
    ],
    case: Case::Insensitive,
    pattern: None,
};

/// Execution hints for the terms aggregation.
pub static TERMS_EXECUTION_HINTS: Registry = Registry {
    name: "terms execution hint",
    tokens: &["map", "global_ordinals"],
    case: Case::Insensitive,
    pattern: None,
};

/// Rewrite methods for multi-term queries (wildcard, prefix, fuzzy, ...).
pub static REWRITE_METHODS: Registry = Registry {
    name: "rewrite method",
    tokens: &[
        "constant_score",
        "constant_score_auto",
        "constant_score_filter",
        "scoring_boolean",
        "constant_score_boolean",
    ],
    case: Case::Insensitive,
    pattern: Some(TokenPattern {
        description: "top_terms_boost_N or top_terms_N (N a positive integer)",
        matches: is_top_terms,
    }),
};

/// Distance calculation modes for geo aggregations.
pub static DISTANCE_TYPES: Registry = Registry {
    name: "distance type",
    tokens: &["arc", "plane"],
    case: Case::Insensitive,
    pattern: None,
};

// Any positive integer, leading zeros allowed, with no upper bound.
static TOP_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^top_terms_(?:boost_)?0*[1-9][0-9]*$").expect("top_terms pattern is valid")
});

fn is_top_terms(token: &str) -> bool {
    TOP_TERMS.is_match(token)
}
