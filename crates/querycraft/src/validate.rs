//! Validation of constrained option values.
//!
//! Validators are pure: they either return the canonical form of the value
//! or a [`QueryError::InvalidOptionValue`] describing what would have been
//! accepted. Nodes call them before touching their option state, so a
//! rejected value never reaches the node.

use crate::error::{QueryError, Result};
use crate::registry::{
    Registry, TokenPattern, DISTANCE_TYPES, DISTANCE_UNITS, EXECUTION_HINTS, REWRITE_METHODS,
    TERMS_EXECUTION_HINTS,
};
use crate::WireValue;

/// Signature shared by every option validator.
///
/// Arguments are the candidate value, the wire option name and a context
/// string naming the node kind (used in error messages).
pub type Validator = fn(&WireValue, &str, &str) -> Result<WireValue>;

/// Checks `candidate` against `registry`, returning the canonical token.
///
/// The candidate must be a string. It is normalized with the registry's case
/// policy and accepted when it is a listed token or matches the registry's
/// pattern.
pub fn validate_enumerable(
    candidate: &WireValue,
    option: &str,
    registry: &Registry,
    context: &str,
) -> Result<String> {
    if let Some(token) = candidate.as_str() {
        let normalized = registry.normalize(token);
        if registry.accepts(&normalized) {
            return Ok(normalized.into_owned());
        }
    }
    Err(rejected(
        candidate,
        option,
        registry.tokens.to_vec(),
        registry.pattern.map(|p| p.description),
        context,
    ))
}

/// Checks `candidate` against a structural pattern only.
///
/// Pattern families are lower-case tokens, so the candidate is lower-cased
/// first and returned in that form, as [`validate_enumerable`] does for
/// case-insensitive registries.
pub fn validate_pattern(
    candidate: &WireValue,
    option: &str,
    pattern: &TokenPattern,
    context: &str,
) -> Result<String> {
    match candidate.as_str().map(str::to_lowercase) {
        Some(token) if (pattern.matches)(&token) => Ok(token),
        _ => Err(rejected(
            candidate,
            option,
            Vec::new(),
            Some(pattern.description),
            context,
        )),
    }
}

fn rejected(
    candidate: &WireValue,
    option: &str,
    allowed: Vec<&'static str>,
    pattern: Option<&'static str>,
    context: &str,
) -> QueryError {
    tracing::debug!(option, value = %candidate, context, "rejected option value");
    QueryError::InvalidOptionValue {
        option: option.to_string(),
        value: candidate.clone(),
        allowed,
        pattern,
        context: context.to_string(),
    }
}

fn against(
    registry: &Registry,
    candidate: &WireValue,
    option: &str,
    context: &str,
) -> Result<WireValue> {
    validate_enumerable(candidate, option, registry, context).map(WireValue::String)
}

/// Validates a distance unit (`km`, `NM`, `meters`, ...).
pub fn distance_unit(candidate: &WireValue, option: &str, context: &str) -> Result<WireValue> {
    against(&DISTANCE_UNITS, candidate, option, context)
}

/// Validates a diversified-sampler execution hint.
pub fn execution_hint(candidate: &WireValue, option: &str, context: &str) -> Result<WireValue> {
    against(&EXECUTION_HINTS, candidate, option, context)
}

/// Validates a terms-aggregation execution hint.
pub fn terms_execution_hint(
    candidate: &WireValue,
    option: &str,
    context: &str,
) -> Result<WireValue> {
    against(&TERMS_EXECUTION_HINTS, candidate, option, context)
}

/// Validates a multi-term rewrite method, including `top_terms_N` families.
pub fn rewrite_method(candidate: &WireValue, option: &str, context: &str) -> Result<WireValue> {
    against(&REWRITE_METHODS, candidate, option, context)
}

/// Validates a geo distance type (`arc` or `plane`).
pub fn distance_type(candidate: &WireValue, option: &str, context: &str) -> Result<WireValue> {
    against(&DISTANCE_TYPES, candidate, option, context)
}

/// Validator applied to an option on nodes without a closed option table.
///
/// Dispatch is by wire option name. `execution_hint` also depends on the
/// kind: `terms` accepts the narrower terms hints, every other kind the
/// sampler hints.
pub fn default_validator(kind: &str, option: &str) -> Option<Validator> {
    match option {
        "unit" => Some(distance_unit),
        "execution_hint" if kind == "terms" => Some(terms_execution_hint),
        "execution_hint" => Some(execution_hint),
        "rewrite" => Some(rewrite_method),
        "distance_type" => Some(distance_type),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enumerable_accepts_member() {
        let token = validate_enumerable(&json!("km"), "unit", &DISTANCE_UNITS, "test").unwrap();
        assert_eq!(token, "km");
    }

    #[test]
    fn enumerable_rejects_non_member() {
        let err =
            validate_enumerable(&json!("furlongs"), "unit", &DISTANCE_UNITS, "test").unwrap_err();
        match err {
            QueryError::InvalidOptionValue {
                option,
                value,
                allowed,
                pattern,
                context,
            } => {
                assert_eq!(option, "unit");
                assert_eq!(value, json!("furlongs"));
                assert_eq!(allowed.len(), DISTANCE_UNITS.tokens.len());
                assert!(pattern.is_none());
                assert_eq!(context, "test");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn enumerable_rejects_non_string() {
        assert!(validate_enumerable(&json!(3), "unit", &DISTANCE_UNITS, "test").is_err());
        assert!(validate_enumerable(&json!(null), "unit", &DISTANCE_UNITS, "test").is_err());
    }

    #[test]
    fn enumerable_returns_normalized_token() {
        let token =
            validate_enumerable(&json!("MAP"), "execution_hint", &EXECUTION_HINTS, "test").unwrap();
        assert_eq!(token, "map");
    }

    #[test]
    fn pattern_only_validation() {
        let pattern = REWRITE_METHODS.pattern.unwrap();
        assert!(validate_pattern(&json!("top_terms_3"), "rewrite", &pattern, "t").is_ok());
        assert_eq!(
            validate_pattern(&json!("TOP_TERMS_3"), "rewrite", &pattern, "t").unwrap(),
            "top_terms_3"
        );
        let err = validate_pattern(&json!("constant_score"), "rewrite", &pattern, "t").unwrap_err();
        match err {
            QueryError::InvalidOptionValue {
                allowed, pattern, ..
            } => {
                assert!(allowed.is_empty());
                assert!(pattern.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rewrite_validator() {
        assert_eq!(
            rewrite_method(&json!("top_terms_boost_7"), "rewrite", "t").unwrap(),
            json!("top_terms_boost_7")
        );
        assert_eq!(
            rewrite_method(&json!("Scoring_Boolean"), "rewrite", "t").unwrap(),
            json!("scoring_boolean")
        );
        assert!(rewrite_method(&json!("top_terms_boost_abc"), "rewrite", "t").is_err());
    }

    #[test]
    fn default_dispatch_by_name() {
        assert!(default_validator("geo_distance", "unit").is_some());
        assert!(default_validator("wildcard", "rewrite").is_some());
        assert!(default_validator("diversified_sampler", "execution_hint").is_some());
        assert!(default_validator("fuzzy", "fuzziness").is_none());
    }

    #[test]
    fn execution_hint_dispatch_follows_kind() {
        let hash = json!("global_ordinals_hash");
        let terms = default_validator("terms", "execution_hint").unwrap();
        assert!(terms(&hash, "execution_hint", "terms aggregation").is_err());
        assert!(terms(&json!("map"), "execution_hint", "terms aggregation").is_ok());

        let sampler = default_validator("diversified_sampler", "execution_hint").unwrap();
        assert!(sampler(&hash, "execution_hint", "sampler").is_ok());
    }
}
