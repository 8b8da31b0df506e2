//! Flattening node trees into wire documents.
//!
//! Clause layout:
//!
//! ```text
//! field-keyed leaf   { tag: { field: { ...options } } }
//! flat kind          { tag: { field?, ...options, slot: [child, ...], ... } }
//! ```
//!
//! A field-keyed kind that holds children falls back to the flat body, so
//! children are never dropped.
//!
//! Aggregation layout:
//!
//! ```text
//! { tag: { field?, script?, ...options }, meta?, aggs?: { name: body, ... } }
//! ```
//!
//! Options appear in insertion order. Structural keys sit at the positions
//! shown. Serialization only reads the tree, so it is repeatable and never
//! fails; compound clauses without children still produce a body.

use serde::{Serialize, Serializer};
use serde_json::Map;

use crate::aggregation::AggregationNode;
use crate::clause::ClauseNode;
use crate::config::WireConfig;
use crate::error::Result;
use crate::kind::Layout;
use crate::{WireDocument, WireValue};

/// Serializes a clause tree.
pub fn clause_document(node: &ClauseNode) -> WireDocument {
    tracing::trace!(kind = node.type_tag(), "serializing clause");
    keyed(node.type_tag(), WireValue::Object(clause_body(node)))
}

fn clause_body(node: &ClauseNode) -> Map<String, WireValue> {
    match (node.layout(), node.field()) {
        (Layout::FieldKeyed, Some(field)) if !node.has_children() => {
            let mut body = Map::new();
            body.insert(field.to_string(), WireValue::Object(node.options().clone()));
            body
        }
        (_, field) => {
            let mut body = Map::new();
            if let Some(field) = field {
                body.insert("field".to_string(), WireValue::from(field));
            }
            body.extend(node.options().clone());
            for slot in node.child_slots() {
                let children: Vec<WireValue> = node.children_in(slot).map(clause_document).collect();
                if !children.is_empty() {
                    body.insert(slot.to_string(), WireValue::Array(children));
                }
            }
            body
        }
    }
}

/// Serializes an aggregation with the default [`WireConfig`].
pub fn aggregation_document(node: &AggregationNode) -> WireDocument {
    aggregation_document_with(node, &WireConfig::default())
}

/// Serializes an aggregation and its sub-aggregations.
///
/// The result is the aggregation's body; its name is the key the caller
/// nests it under (see [`named_aggregations`]).
pub fn aggregation_document_with(node: &AggregationNode, config: &WireConfig) -> WireDocument {
    tracing::trace!(name = node.name(), kind = node.type_tag(), "serializing aggregation");

    let mut definition = Map::new();
    if let Some(field) = node.field() {
        definition.insert("field".to_string(), WireValue::from(field));
    }
    if let Some(script) = node.script() {
        definition.insert("script".to_string(), script.to_value());
    }
    definition.extend(node.options().clone());

    let mut body = Map::new();
    body.insert(node.type_tag().to_string(), WireValue::Object(definition));
    if let Some(meta) = node.meta() {
        body.insert("meta".to_string(), WireValue::Object(meta.clone()));
    }
    if !node.sub_aggregations().is_empty() {
        body.insert(
            config.aggs_key.as_str().to_string(),
            WireValue::Object(named_aggregations(node.sub_aggregations(), config)),
        );
    }
    WireValue::Object(body)
}

/// Builds a `{ name: body, ... }` map from aggregations.
///
/// Later entries with a repeated name replace earlier ones in place.
pub fn named_aggregations<'a>(
    nodes: impl IntoIterator<Item = &'a AggregationNode>,
    config: &WireConfig,
) -> Map<String, WireValue> {
    nodes
        .into_iter()
        .map(|node| {
            (
                node.name().to_string(),
                aggregation_document_with(node, config),
            )
        })
        .collect()
}

fn keyed(key: &str, body: WireValue) -> WireDocument {
    let mut document = Map::new();
    document.insert(key.to_string(), body);
    WireValue::Object(document)
}

impl ClauseNode {
    /// Serializes this clause tree. See [`clause_document`].
    pub fn to_document(&self) -> WireDocument {
        clause_document(self)
    }
}

impl AggregationNode {
    /// Serializes this aggregation with the default configuration.
    pub fn to_document(&self) -> WireDocument {
        aggregation_document(self)
    }

    /// Serializes this aggregation with `config`.
    pub fn to_document_with(&self, config: &WireConfig) -> WireDocument {
        aggregation_document_with(self, config)
    }

    /// Serializes this aggregation as `{ name: body }`.
    pub fn to_named_document(&self) -> WireDocument {
        keyed(self.name(), aggregation_document(self))
    }
}

impl Serialize for ClauseNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        clause_document(self).serialize(serializer)
    }
}

impl Serialize for AggregationNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        aggregation_document(self).serialize(serializer)
    }
}

/// Renders any serializable value as compact JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Renders any serializable value as pretty-printed JSON.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
