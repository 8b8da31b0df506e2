//! Query clause nodes.
//!
//! A [`ClauseNode`] is a single clause of the query DSL: a type tag, an
//! optional target field, the option values set so far and, for compound
//! kinds, child clauses grouped into named slots.

use std::borrow::Cow;

use serde_json::Map;

use crate::error::{QueryError, Result};
use crate::kind::{ClauseShape, Layout};
use crate::WireValue;

/// Option key under which single-value clauses store their value.
pub const VALUE_KEY: &str = "value";

/// A query clause.
///
/// # Example
///
/// ```
/// use querycraft::ClauseNode;
/// use serde_json::json;
///
/// let mut clause = ClauseNode::with_value("fuzzy", "title", "foo");
/// clause.set_option("fuzziness", "AUTO")?.set_option("prefix_length", 2)?;
///
/// assert_eq!(
///     clause.to_document(),
///     json!({ "fuzzy": { "title": { "value": "foo", "fuzziness": "AUTO", "prefix_length": 2 } } })
/// );
/// # Ok::<(), querycraft::QueryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClauseNode {
    type_tag: Cow<'static, str>,
    shape: ClauseShape,
    field: Option<String>,
    options: Map<String, WireValue>,
    children: Vec<(&'static str, ClauseNode)>,
}

impl ClauseNode {
    /// Creates a flat clause without a field, accepting any option.
    pub fn new(type_tag: impl Into<Cow<'static, str>>) -> Self {
        Self::from_shape(type_tag, ClauseShape::FLAT, None)
    }

    /// Creates a field-keyed clause accepting any option.
    pub fn for_field(type_tag: impl Into<Cow<'static, str>>, field: impl Into<String>) -> Self {
        Self::from_shape(type_tag, ClauseShape::FIELD_KEYED, Some(field.into()))
    }

    /// Creates a field-keyed clause with its value stored under `value`.
    pub fn with_value(
        type_tag: impl Into<Cow<'static, str>>,
        field: impl Into<String>,
        value: impl Into<WireValue>,
    ) -> Self {
        let mut node = Self::for_field(type_tag, field);
        node.put(VALUE_KEY, value);
        node
    }

    /// Creates a compound clause whose children live in `child_slots`.
    ///
    /// The first slot is the one [`add_child`](Self::add_child) appends to.
    pub fn compound(
        type_tag: impl Into<Cow<'static, str>>,
        child_slots: &'static [&'static str],
    ) -> Self {
        let shape = ClauseShape {
            child_slots,
            ..ClauseShape::FLAT
        };
        Self::from_shape(type_tag, shape, None)
    }

    /// Creates a clause configured by a kind record.
    ///
    /// ```
    /// use querycraft::{ClauseNode, ClauseShape, Layout, OptionSet, OptionSpec};
    ///
    /// const REGEXP: ClauseShape = ClauseShape {
    ///     layout: Layout::FieldKeyed,
    ///     options: OptionSet::Only(&[OptionSpec::free("value"), OptionSpec::free("flags")]),
    ///     child_slots: &[],
    /// };
    ///
    /// let mut clause = ClauseNode::from_shape("regexp", REGEXP, Some("user".to_string()));
    /// assert!(clause.set_option("flags", "ALL").is_ok());
    /// assert!(clause.set_option("boost", 2).is_err());
    /// ```
    pub fn from_shape(
        type_tag: impl Into<Cow<'static, str>>,
        shape: ClauseShape,
        field: Option<String>,
    ) -> Self {
        ClauseNode {
            type_tag: type_tag.into(),
            shape,
            field,
            options: Map::new(),
            children: Vec::new(),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Sets an option, validating it first when the option is constrained.
    ///
    /// On error the node is left exactly as it was.
    pub fn set_option(&mut self, name: &str, value: impl Into<WireValue>) -> Result<&mut Self> {
        let context = format!("{} query", self.type_tag);
        let value = self
            .shape
            .options
            .resolve(&self.type_tag, &context, name, value.into())?;
        self.options.insert(name.to_string(), value);
        Ok(self)
    }

    /// By-value form of [`set_option`](Self::set_option).
    pub fn with_option(mut self, name: &str, value: impl Into<WireValue>) -> Result<Self> {
        self.set_option(name, value)?;
        Ok(self)
    }

    /// Appends a child clause to the kind's default slot.
    pub fn add_child(&mut self, child: impl Into<ClauseNode>) -> Result<&mut Self> {
        let slots = self.shape.child_slots;
        match slots.first() {
            Some(&slot) => {
                self.children.push((slot, child.into()));
                Ok(self)
            }
            None => {
                tracing::debug!(kind = %self.type_tag, "child added to leaf clause");
                Err(QueryError::unsupported(
                    "adding a child clause",
                    self.type_tag.as_ref(),
                ))
            }
        }
    }

    /// Appends a child clause to the named slot.
    pub fn add_child_to(&mut self, slot: &str, child: impl Into<ClauseNode>) -> Result<&mut Self> {
        let slots = self.shape.child_slots;
        match slots.iter().find(|s| **s == slot) {
            Some(&declared) => {
                self.children.push((declared, child.into()));
                Ok(self)
            }
            None => {
                tracing::debug!(kind = %self.type_tag, slot, "unknown child slot");
                Err(QueryError::unsupported(
                    format!("child slot `{slot}`"),
                    self.type_tag.as_ref(),
                ))
            }
        }
    }

    /// Stores an option the caller's kind table is known to accept.
    pub(crate) fn put(&mut self, name: &str, value: impl Into<WireValue>) {
        self.options.insert(name.to_string(), value.into());
    }

    /// Appends to a slot the kind is known to declare.
    pub(crate) fn push_child(&mut self, slot: &'static str, child: ClauseNode) {
        debug_assert!(self.shape.child_slots.contains(&slot));
        self.children.push((slot, child));
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the clause type tag.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Returns the target field, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub(crate) fn layout(&self) -> Layout {
        self.shape.layout
    }

    pub(crate) fn child_slots(&self) -> &'static [&'static str] {
        self.shape.child_slots
    }

    pub(crate) fn options(&self) -> &Map<String, WireValue> {
        &self.options
    }

    pub(crate) fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn children_in<'a>(&'a self, slot: &'a str) -> impl Iterator<Item = &'a ClauseNode> {
        self.children
            .iter()
            .filter(move |(s, _)| *s == slot)
            .map(|(_, child)| child)
    }
}
