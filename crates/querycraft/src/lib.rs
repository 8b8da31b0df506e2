//! Querycraft - fluent builders for search-engine query documents.
//!
//! Querycraft assembles Elasticsearch-style Query DSL and Aggregation DSL
//! documents from typed builders. It supports:
//!
//! - Generic clause and aggregation nodes driven by per-kind option tables
//! - Eager validation of enumerated options (distance units, execution hints,
//!   rewrite methods) with errors at the setter call
//! - Compound clauses with ordered child slots
//! - Arbitrarily nested named sub-aggregations
//! - Deterministic, order-preserving JSON serialization
//!
//! # Quick Start
//!
//! ```rust
//! use querycraft::{AvgAggregation, BoolQuery, FuzzyQuery, SearchBody, TermQuery, TermsAggregation};
//! use serde_json::json;
//!
//! let query = BoolQuery::new()
//!     .must(FuzzyQuery::new("title", "foo").fuzziness("AUTO"))
//!     .filter(TermQuery::new("status", "published"));
//!
//! let body = SearchBody::new()
//!     .query(query)
//!     .agg(
//!         TermsAggregation::new("by_category")
//!             .field("category")
//!             .agg(AvgAggregation::new("avg_price").field("price")),
//!     );
//!
//! let document = body.to_document();
//! assert_eq!(
//!     document["aggs"]["by_category"]["aggs"],
//!     json!({ "avg_price": { "avg": { "field": "price" } } })
//! );
//! ```
//!
//! # Generic Nodes
//!
//! Kinds outside the bundled catalog are built from the generic nodes
//! directly. Open nodes accept any option name; well-known constrained
//! names (`rewrite`, `unit`, `execution_hint`, `distance_type`) are still
//! validated.
//!
//! ```rust
//! use querycraft::{ClauseNode, QueryError};
//!
//! let mut clause = ClauseNode::with_value("regexp", "user", "k.*y");
//! clause.set_option("flags", "ALL")?;
//!
//! let err = clause.set_option("rewrite", "fastest").unwrap_err();
//! assert!(matches!(err, QueryError::InvalidOptionValue { .. }));
//! # Ok::<(), QueryError>(())
//! ```
//!
//! # Wire Layout
//!
//! | Node | Document |
//! |------|----------|
//! | field-keyed clause | `{ tag: { field: { ...options } } }` |
//! | flat / compound clause | `{ tag: { ...options, slot: [..] } }` |
//! | aggregation | `{ tag: { field, script, ...options }, meta, aggs }` |

mod aggregation;
mod clause;
mod config;
mod error;
mod kind;
mod script;
mod search;
mod serialize;

pub mod aggregations;
pub mod queries;
pub mod registry;
pub mod validate;

/// A value stored in a node's options.
pub type WireValue = serde_json::Value;

/// A serialized document, ready for a transport.
pub type WireDocument = serde_json::Value;

// Re-export public API
pub use aggregation::AggregationNode;
pub use aggregations::{
    AvgAggregation, DiversifiedSamplerAggregation, GeoDistanceAggregation, MaxAggregation,
    MinAggregation, SumAggregation, TermsAggregation, ValueCountAggregation,
};
pub use clause::{ClauseNode, VALUE_KEY};
pub use config::{AggsKey, WireConfig};
pub use error::{QueryError, Result};
pub use kind::{ClauseShape, Layout, OptionSet, OptionSpec};
pub use queries::{
    BoolQuery, ExistsQuery, FuzzyQuery, MatchAllQuery, PrefixQuery, TermQuery, WildcardQuery,
};
pub use registry::Registry;
pub use script::Script;
pub use search::{SearchBody, Transport};
pub use serialize::{
    aggregation_document, aggregation_document_with, clause_document, named_aggregations, to_json,
    to_json_pretty,
};
pub use validate::{validate_enumerable, validate_pattern, Validator};
