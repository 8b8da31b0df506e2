//! Compound queries combining other clauses.

use super::{BOOST, NAME};
use crate::clause::ClauseNode;
use crate::kind::{ClauseShape, Layout, OptionSet, OptionSpec};
use crate::WireValue;

const BOOL: ClauseShape = ClauseShape {
    layout: Layout::Flat,
    options: OptionSet::Only(&[BOOST, NAME, OptionSpec::free("minimum_should_match")]),
    child_slots: &["must", "filter", "should", "must_not"],
};

clause_builder! {
    /// Combines clauses with boolean logic.
    ///
    /// Children are emitted per occurrence type in the order `must`,
    /// `filter`, `should`, `must_not`; within a type, in insertion order.
    ///
    /// ```
    /// use querycraft::{BoolQuery, TermQuery};
    /// use serde_json::json;
    ///
    /// let query = BoolQuery::new()
    ///     .must(TermQuery::new("user", "kimchy"))
    ///     .must_not(TermQuery::new("status", "deleted"));
    ///
    /// assert_eq!(
    ///     query.to_document(),
    ///     json!({
    ///         "bool": {
    ///             "must": [{ "term": { "user": { "value": "kimchy" } } }],
    ///             "must_not": [{ "term": { "status": { "value": "deleted" } } }]
    ///         }
    ///     })
    /// );
    /// ```
    BoolQuery
}

impl BoolQuery {
    /// Creates an empty bool query.
    pub fn new() -> Self {
        BoolQuery(ClauseNode::from_shape("bool", BOOL, None))
    }

    /// Adds a clause that must match and contributes to the score.
    pub fn must(mut self, clause: impl Into<ClauseNode>) -> Self {
        self.0.push_child("must", clause.into());
        self
    }

    /// Adds a clause that must match, in filter context.
    pub fn filter(mut self, clause: impl Into<ClauseNode>) -> Self {
        self.0.push_child("filter", clause.into());
        self
    }

    /// Adds a clause that should match.
    pub fn should(mut self, clause: impl Into<ClauseNode>) -> Self {
        self.0.push_child("should", clause.into());
        self
    }

    /// Adds a clause that must not match.
    pub fn must_not(mut self, clause: impl Into<ClauseNode>) -> Self {
        self.0.push_child("must_not", clause.into());
        self
    }

    /// Minimum number (or percentage, e.g. `"75%"`) of `should` clauses
    /// that must match.
    pub fn minimum_should_match(mut self, value: impl Into<WireValue>) -> Self {
        self.0.put("minimum_should_match", value);
        self
    }
}

impl Default for BoolQuery {
    fn default() -> Self {
        Self::new()
    }
}
