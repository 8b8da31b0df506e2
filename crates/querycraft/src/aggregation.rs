//! Aggregation nodes.
//!
//! An [`AggregationNode`] carries a caller-chosen name, a type tag, a value
//! source (field and/or script), option values and named sub-aggregations.
//! The name is not part of the node's own body: the parent (or the search
//! body) uses it as the key the body is nested under.

use std::borrow::Cow;

use serde_json::Map;

use crate::error::Result;
use crate::kind::OptionSet;
use crate::script::Script;
use crate::WireValue;

/// A named aggregation.
///
/// # Example
///
/// ```
/// use querycraft::AggregationNode;
/// use serde_json::json;
///
/// let mut by_category = AggregationNode::on_field("by_category", "terms", "category");
/// by_category.add_sub_aggregation(AggregationNode::on_field("avg_price", "avg", "price"));
///
/// assert_eq!(
///     by_category.to_document(),
///     json!({
///         "terms": { "field": "category" },
///         "aggs": { "avg_price": { "avg": { "field": "price" } } }
///     })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AggregationNode {
    name: String,
    type_tag: Cow<'static, str>,
    option_set: OptionSet,
    field: Option<String>,
    script: Option<Script>,
    options: Map<String, WireValue>,
    meta: Option<Map<String, WireValue>>,
    sub_aggregations: Vec<AggregationNode>,
}

impl AggregationNode {
    /// Creates an aggregation without a value source, accepting any option.
    pub fn new(name: impl Into<String>, type_tag: impl Into<Cow<'static, str>>) -> Self {
        Self::from_options(name, type_tag, OptionSet::Open)
    }

    /// Creates an aggregation over `field`, accepting any option.
    pub fn on_field(
        name: impl Into<String>,
        type_tag: impl Into<Cow<'static, str>>,
        field: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(name, type_tag);
        node.field = Some(field.into());
        node
    }

    /// Creates an aggregation restricted to the options in `option_set`.
    pub fn from_options(
        name: impl Into<String>,
        type_tag: impl Into<Cow<'static, str>>,
        option_set: OptionSet,
    ) -> Self {
        AggregationNode {
            name: name.into(),
            type_tag: type_tag.into(),
            option_set,
            field: None,
            script: None,
            options: Map::new(),
            meta: None,
            sub_aggregations: Vec::new(),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Sets an option, validating it first when the option is constrained.
    ///
    /// On error the node is left exactly as it was.
    pub fn set_option(&mut self, name: &str, value: impl Into<WireValue>) -> Result<&mut Self> {
        let context = format!("{} aggregation", self.type_tag);
        let value = self
            .option_set
            .resolve(&self.type_tag, &context, name, value.into())?;
        self.options.insert(name.to_string(), value);
        Ok(self)
    }

    /// By-value form of [`set_option`](Self::set_option).
    pub fn with_option(mut self, name: &str, value: impl Into<WireValue>) -> Result<Self> {
        self.set_option(name, value)?;
        Ok(self)
    }

    /// Sets the field to aggregate on. Any script stays in place.
    pub fn set_field(&mut self, field: impl Into<String>) -> &mut Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the script producing the values. Any field stays in place.
    pub fn set_script(&mut self, script: impl Into<Script>) -> &mut Self {
        self.script = Some(script.into());
        self
    }

    /// Sets metadata the engine echoes back with the aggregation result.
    pub fn set_meta(&mut self, meta: Map<String, WireValue>) -> &mut Self {
        self.meta = Some(meta);
        self
    }

    /// Nests `child` under its own name.
    ///
    /// A sibling with the same name is replaced in its original position.
    pub fn add_sub_aggregation(&mut self, child: impl Into<AggregationNode>) -> &mut Self {
        insert_named(&mut self.sub_aggregations, child.into());
        self
    }

    pub(crate) fn put(&mut self, name: &str, value: impl Into<WireValue>) {
        self.options.insert(name.to_string(), value.into());
    }

    /// Mutable access to an option already stored, for accumulating options
    /// such as range lists.
    pub(crate) fn option_mut(&mut self, name: &str) -> Option<&mut WireValue> {
        self.options.get_mut(name)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the aggregation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the aggregation type tag.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Returns the field, if set.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the script, if set.
    pub fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    pub(crate) fn options(&self) -> &Map<String, WireValue> {
        &self.options
    }

    pub(crate) fn meta(&self) -> Option<&Map<String, WireValue>> {
        self.meta.as_ref()
    }

    pub(crate) fn sub_aggregations(&self) -> &[AggregationNode] {
        &self.sub_aggregations
    }
}

/// Inserts `node` keyed by name, replacing a same-named entry in place.
pub(crate) fn insert_named(nodes: &mut Vec<AggregationNode>, node: AggregationNode) {
    match nodes.iter_mut().find(|existing| existing.name == node.name) {
        Some(existing) => *existing = node,
        None => nodes.push(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use serde_json::json;

    #[test]
    fn field_and_script_coexist() {
        let mut node = AggregationNode::on_field("total", "sum", "price");
        node.set_script("_value * 2");
        assert_eq!(node.field(), Some("price"));
        assert!(node.script().is_some());

        node.set_field("cost");
        assert_eq!(node.field(), Some("cost"));
        assert!(node.script().is_some());
    }

    #[test]
    fn duplicate_sub_aggregation_replaces_in_place() {
        let mut node = AggregationNode::on_field("by_tag", "terms", "tag");
        node.add_sub_aggregation(AggregationNode::on_field("a", "min", "x"))
            .add_sub_aggregation(AggregationNode::on_field("b", "max", "x"))
            .add_sub_aggregation(AggregationNode::on_field("a", "avg", "y"));

        let names: Vec<&str> = node.sub_aggregations().iter().map(|n| n.name()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(node.sub_aggregations()[0].type_tag(), "avg");
    }

    #[test]
    fn failed_set_option_leaves_state() {
        let mut node = AggregationNode::on_field("dist", "geo_distance", "location");
        node.set_option("unit", "km").unwrap();
        let err = node.set_option("unit", "furlongs").unwrap_err();
        assert!(matches!(err, QueryError::InvalidOptionValue { .. }));
        assert_eq!(node.options()["unit"], json!("km"));
    }

    #[test]
    fn meta_is_stored() {
        let mut meta = Map::new();
        meta.insert("color".to_string(), json!("blue"));
        let mut node = AggregationNode::new("n", "avg");
        node.set_meta(meta);
        assert_eq!(node.meta().unwrap()["color"], json!("blue"));
    }
}
