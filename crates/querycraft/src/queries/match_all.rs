use super::{BOOST, NAME};
use crate::clause::ClauseNode;
use crate::kind::{ClauseShape, Layout, OptionSet};

const MATCH_ALL: ClauseShape = ClauseShape {
    layout: Layout::Flat,
    options: OptionSet::Only(&[BOOST, NAME]),
    child_slots: &[],
};

clause_builder! {
    /// Matches every document.
    MatchAllQuery
}

impl MatchAllQuery {
    /// Creates a match-all query.
    pub fn new() -> Self {
        MatchAllQuery(ClauseNode::from_shape("match_all", MATCH_ALL, None))
    }
}

impl Default for MatchAllQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_with_boost() {
        assert_eq!(
            MatchAllQuery::new().boost(1.2).to_document(),
            json!({ "match_all": { "boost": 1.2 } })
        );
    }
}
