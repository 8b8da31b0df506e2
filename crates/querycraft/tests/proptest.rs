//! Property-based tests for querycraft using proptest.

use proptest::prelude::*;
use querycraft::registry::{DISTANCE_UNITS, EXECUTION_HINTS, REWRITE_METHODS};
use querycraft::{to_json, validate_enumerable, AggregationNode, ClauseNode, QueryError};
use serde_json::json;

// ============================================================================
// Test helpers
// ============================================================================

fn option_name() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(_[a-z]{1,6})?"
        .prop_filter("constrained names are validated", |name| {
            !matches!(
                name.as_str(),
                "unit" | "rewrite" | "execution_hint" | "distance_type"
            )
        })
}

fn first_seen(names: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for name in names {
        if !seen.contains(name) {
            seen.push(name.clone());
        }
    }
    seen
}

// ============================================================================
// Serialization
// ============================================================================

proptest! {
    #[test]
    fn serialization_is_idempotent(
        options in prop::collection::vec((option_name(), any::<i64>()), 0..8),
    ) {
        let mut node = ClauseNode::for_field("match", "title");
        for (name, value) in &options {
            node.set_option(name, *value).unwrap();
        }

        prop_assert_eq!(node.to_document(), node.to_document());
        prop_assert_eq!(to_json(&node).unwrap(), to_json(&node).unwrap());
    }

    #[test]
    fn option_order_is_first_insertion(
        names in prop::collection::vec(option_name(), 1..10),
    ) {
        let mut node = ClauseNode::for_field("match", "title");
        for (i, name) in names.iter().enumerate() {
            node.set_option(name, i as u64).unwrap();
        }

        let document = node.to_document();
        let body = document["match"]["title"].as_object().unwrap();
        let keys: Vec<String> = body.keys().cloned().collect();
        prop_assert_eq!(keys, first_seen(&names));

        // the last write wins
        let last = names.len() - 1;
        prop_assert_eq!(&body[names[last].as_str()], &json!(last as u64));
    }

    #[test]
    fn sub_aggregation_order_is_first_insertion(
        names in prop::collection::vec("[a-z]{1,4}", 1..10),
    ) {
        let mut parent = AggregationNode::on_field("parent", "terms", "tag");
        for name in &names {
            parent.add_sub_aggregation(AggregationNode::on_field(name.clone(), "min", "x"));
        }

        let document = parent.to_document();
        let keys: Vec<String> = document["aggs"].as_object().unwrap().keys().cloned().collect();
        prop_assert_eq!(keys, first_seen(&names));
    }
}

// ============================================================================
// Validation
// ============================================================================

proptest! {
    #[test]
    fn listed_units_accepted(index in 0..DISTANCE_UNITS.tokens.len()) {
        let unit = DISTANCE_UNITS.tokens[index];
        let mut node = AggregationNode::on_field("rings", "geo_distance", "location");
        node.set_option("unit", unit).unwrap();
        prop_assert_eq!(&node.to_document()["geo_distance"]["unit"], &json!(unit));
    }

    #[test]
    fn unknown_units_rejected_without_mutation(
        unit in "[a-z]{1,12}".prop_filter("not a unit", |u| !DISTANCE_UNITS.contains(u)),
    ) {
        let mut node = AggregationNode::on_field("rings", "geo_distance", "location");
        node.set_option("unit", "km").unwrap();
        let before = node.to_document();

        let err = node.set_option("unit", unit.as_str()).unwrap_err();
        let is_invalid = matches!(err, QueryError::InvalidOptionValue { .. });
        prop_assert!(is_invalid);
        prop_assert_eq!(node.to_document(), before);
    }

    #[test]
    fn execution_hints_case_insensitive(index in 0..EXECUTION_HINTS.tokens.len()) {
        let hint = EXECUTION_HINTS.tokens[index];
        let shouted = json!(hint.to_uppercase());
        let stored = validate_enumerable(&shouted, "execution_hint", &EXECUTION_HINTS, "test");
        prop_assert_eq!(stored.unwrap(), hint);
    }

    #[test]
    fn top_terms_with_positive_size_accepted(n in 1u32..u32::MAX, boost in any::<bool>()) {
        let token = if boost {
            format!("top_terms_boost_{n}")
        } else {
            format!("top_terms_{n}")
        };
        let mut node = ClauseNode::with_value("wildcard", "user", "ki*");
        node.set_option("rewrite", token.as_str()).unwrap();
        prop_assert_eq!(&node.to_document()["wildcard"]["user"]["rewrite"], &json!(token));
    }

    #[test]
    fn top_terms_with_non_numeric_size_rejected(suffix in "[a-z]{1,8}") {
        let token = json!(format!("top_terms_boost_{suffix}"));
        prop_assert!(validate_enumerable(&token, "rewrite", &REWRITE_METHODS, "test").is_err());
    }
}
