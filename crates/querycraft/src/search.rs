//! Search request bodies and the transport seam.
//!
//! A [`SearchBody`] assembles a root query and named aggregations into the
//! document sent to the engine's `_search` endpoint. Sending is delegated to
//! a caller-supplied [`Transport`]; this crate never performs I/O itself.

use serde::{Serialize, Serializer};
use serde_json::Map;

use crate::aggregation::{insert_named, AggregationNode};
use crate::clause::ClauseNode;
use crate::config::WireConfig;
use crate::serialize::named_aggregations;
use crate::{WireDocument, WireValue};

/// Something that can deliver a wire document to a search engine.
///
/// # Example
///
/// ```
/// use querycraft::{MatchAllQuery, SearchBody, Transport, WireDocument};
///
/// struct Capture;
///
/// impl Transport for Capture {
///     type Response = String;
///     type Error = std::convert::Infallible;
///
///     fn send(&self, document: &WireDocument) -> Result<String, Self::Error> {
///         Ok(document.to_string())
///     }
/// }
///
/// let body = SearchBody::new().query(MatchAllQuery::new()).size(0);
/// let sent = body.send_with(&Capture).unwrap();
/// assert_eq!(sent, r#"{"query":{"match_all":{}},"size":0}"#);
/// ```
pub trait Transport {
    /// What the engine answered.
    type Response;
    /// Transport failure.
    type Error;

    /// Sends `document` and waits for the response.
    fn send(&self, document: &WireDocument) -> Result<Self::Response, Self::Error>;
}

/// A search request body.
///
/// # Example
///
/// ```
/// use querycraft::{AvgAggregation, SearchBody, TermQuery, TermsAggregation};
/// use serde_json::json;
///
/// let body = SearchBody::new()
///     .query(TermQuery::new("status", "published"))
///     .agg(
///         TermsAggregation::new("by_category")
///             .field("category")
///             .agg(AvgAggregation::new("avg_price").field("price")),
///     )
///     .size(0);
///
/// assert_eq!(
///     body.to_document(),
///     json!({
///         "query": { "term": { "status": { "value": "published" } } },
///         "aggs": {
///             "by_category": {
///                 "terms": { "field": "category" },
///                 "aggs": { "avg_price": { "avg": { "field": "price" } } }
///             }
///         },
///         "size": 0
///     })
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchBody {
    query: Option<ClauseNode>,
    aggs: Vec<AggregationNode>,
    size: Option<u64>,
    from: Option<u64>,
    config: WireConfig,
}

impl SearchBody {
    /// Creates an empty body. An empty body matches all documents.
    pub fn new() -> Self {
        SearchBody::default()
    }

    /// Sets the root query, replacing any previous one.
    pub fn query(mut self, query: impl Into<ClauseNode>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Adds a top-level aggregation. A same-named one is replaced in place.
    pub fn agg(mut self, agg: impl Into<AggregationNode>) -> Self {
        insert_named(&mut self.aggs, agg.into());
        self
    }

    /// Sets the maximum number of hits to return.
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the number of hits to skip.
    pub fn from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the wire configuration used for aggregation keys.
    pub fn config(mut self, config: WireConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns `true` if neither a query nor aggregations are set.
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.aggs.is_empty()
    }

    /// Serializes the body.
    pub fn to_document(&self) -> WireDocument {
        let mut document = Map::new();
        if let Some(query) = &self.query {
            document.insert("query".to_string(), query.to_document());
        }
        if !self.aggs.is_empty() {
            document.insert(
                self.config.aggs_key.as_str().to_string(),
                WireValue::Object(named_aggregations(&self.aggs, &self.config)),
            );
        }
        if let Some(size) = self.size {
            document.insert("size".to_string(), WireValue::from(size));
        }
        if let Some(from) = self.from {
            document.insert("from".to_string(), WireValue::from(from));
        }
        WireValue::Object(document)
    }

    /// Serializes the body and hands it to `transport`.
    pub fn send_with<T: Transport>(&self, transport: &T) -> Result<T::Response, T::Error> {
        let document = self.to_document();
        tracing::debug!(
            has_query = self.query.is_some(),
            aggs = self.aggs.len(),
            "sending search body"
        );
        transport.send(&document)
    }
}

impl Serialize for SearchBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}
