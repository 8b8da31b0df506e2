//! Term-level queries: exact, fuzzy and pattern matching on a single field.

use super::{BOOST, NAME};
use crate::clause::{ClauseNode, VALUE_KEY};
use crate::error::Result;
use crate::kind::{ClauseShape, Layout, OptionSet, OptionSpec};
use crate::validate::rewrite_method;
use crate::WireValue;

const VALUE: OptionSpec = OptionSpec::free(VALUE_KEY);
const CASE_INSENSITIVE: OptionSpec = OptionSpec::free("case_insensitive");
const REWRITE: OptionSpec = OptionSpec::checked("rewrite", rewrite_method);

const fn field_keyed(options: &'static [OptionSpec]) -> ClauseShape {
    ClauseShape {
        layout: Layout::FieldKeyed,
        options: OptionSet::Only(options),
        child_slots: &[],
    }
}

const TERM: ClauseShape = field_keyed(&[VALUE, BOOST, NAME, CASE_INSENSITIVE]);

const FUZZY: ClauseShape = field_keyed(&[
    VALUE,
    BOOST,
    NAME,
    OptionSpec::free("fuzziness"),
    OptionSpec::free("prefix_length"),
    OptionSpec::free("max_expansions"),
    OptionSpec::free("transpositions"),
    REWRITE,
]);

const WILDCARD: ClauseShape = field_keyed(&[VALUE, BOOST, NAME, REWRITE, CASE_INSENSITIVE]);

const PREFIX: ClauseShape = field_keyed(&[VALUE, BOOST, NAME, REWRITE, CASE_INSENSITIVE]);

const EXISTS: ClauseShape = ClauseShape {
    layout: Layout::Flat,
    options: OptionSet::Only(&[BOOST, NAME]),
    child_slots: &[],
};

fn value_clause(type_tag: &'static str, shape: ClauseShape, field: String, value: WireValue) -> ClauseNode {
    let mut node = ClauseNode::from_shape(type_tag, shape, Some(field));
    node.put(VALUE_KEY, value);
    node
}

clause_builder! {
    /// Matches documents whose field contains the exact term.
    ///
    /// ```
    /// use querycraft::TermQuery;
    /// use serde_json::json;
    ///
    /// let query = TermQuery::new("user", "kimchy").boost(2.0);
    /// assert_eq!(
    ///     query.to_document(),
    ///     json!({ "term": { "user": { "value": "kimchy", "boost": 2.0 } } })
    /// );
    /// ```
    TermQuery
}

impl TermQuery {
    /// Creates a term query.
    pub fn new(field: impl Into<String>, value: impl Into<WireValue>) -> Self {
        TermQuery(value_clause("term", TERM, field.into(), value.into()))
    }

    /// Enables ASCII case-insensitive matching.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.0.put("case_insensitive", enabled);
        self
    }
}

clause_builder! {
    /// Matches terms within an edit distance of the given value.
    ///
    /// ```
    /// use querycraft::FuzzyQuery;
    /// use serde_json::json;
    ///
    /// let query = FuzzyQuery::new("title", "foo")
    ///     .fuzziness("AUTO")
    ///     .prefix_length(2)
    ///     .max_expansions(10);
    ///
    /// assert_eq!(
    ///     query.to_document(),
    ///     json!({
    ///         "fuzzy": {
    ///             "title": { "value": "foo", "fuzziness": "AUTO", "prefix_length": 2, "max_expansions": 10 }
    ///         }
    ///     })
    /// );
    /// ```
    FuzzyQuery
}

impl FuzzyQuery {
    /// Creates a fuzzy query.
    pub fn new(field: impl Into<String>, value: impl Into<WireValue>) -> Self {
        FuzzyQuery(value_clause("fuzzy", FUZZY, field.into(), value.into()))
    }

    /// Maximum edit distance: a number of edits or `"AUTO"`.
    pub fn fuzziness(mut self, factor: impl Into<WireValue>) -> Self {
        self.0.put("fuzziness", factor);
        self
    }

    /// Number of leading characters left unchanged when expanding.
    pub fn prefix_length(mut self, len: u32) -> Self {
        self.0.put("prefix_length", len);
        self
    }

    /// Maximum number of terms the query expands to.
    pub fn max_expansions(mut self, limit: u32) -> Self {
        self.0.put("max_expansions", limit);
        self
    }

    /// Counts swaps of adjacent characters as one edit.
    pub fn transpositions(mut self, enabled: bool) -> Self {
        self.0.put("transpositions", enabled);
        self
    }

    /// Sets the rewrite method.
    pub fn rewrite(mut self, method: &str) -> Result<Self> {
        self.0.set_option("rewrite", method)?;
        Ok(self)
    }
}

clause_builder! {
    /// Matches terms against a wildcard pattern (`*` and `?`).
    WildcardQuery
}

impl WildcardQuery {
    /// Creates a wildcard query.
    pub fn new(field: impl Into<String>, pattern: impl Into<WireValue>) -> Self {
        WildcardQuery(value_clause("wildcard", WILDCARD, field.into(), pattern.into()))
    }

    /// Sets the rewrite method.
    ///
    /// Accepts `constant_score`, `constant_score_auto`,
    /// `constant_score_filter`, `scoring_boolean`, `constant_score_boolean`,
    /// `top_terms_boost_N` and `top_terms_N`.
    pub fn rewrite(mut self, method: &str) -> Result<Self> {
        self.0.set_option("rewrite", method)?;
        Ok(self)
    }

    /// Enables ASCII case-insensitive matching.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.0.put("case_insensitive", enabled);
        self
    }
}

clause_builder! {
    /// Matches terms starting with the given prefix.
    PrefixQuery
}

impl PrefixQuery {
    /// Creates a prefix query.
    pub fn new(field: impl Into<String>, prefix: impl Into<WireValue>) -> Self {
        PrefixQuery(value_clause("prefix", PREFIX, field.into(), prefix.into()))
    }

    /// Sets the rewrite method.
    pub fn rewrite(mut self, method: &str) -> Result<Self> {
        self.0.set_option("rewrite", method)?;
        Ok(self)
    }

    /// Enables ASCII case-insensitive matching.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.0.put("case_insensitive", enabled);
        self
    }
}

clause_builder! {
    /// Matches documents that have any indexed value for the field.
    ExistsQuery
}

impl ExistsQuery {
    /// Creates an exists query.
    pub fn new(field: impl Into<String>) -> Self {
        ExistsQuery(ClauseNode::from_shape("exists", EXISTS, Some(field.into())))
    }
}
