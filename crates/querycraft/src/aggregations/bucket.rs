//! Bucket aggregations.

use serde_json::Map;

use crate::aggregation::AggregationNode;
use crate::error::Result;
use crate::kind::{OptionSet, OptionSpec};
use crate::validate::{distance_type, distance_unit, execution_hint, terms_execution_hint};
use crate::WireValue;

const TERMS_OPTIONS: OptionSet = OptionSet::Only(&[
    OptionSpec::free("size"),
    OptionSpec::free("shard_size"),
    OptionSpec::free("min_doc_count"),
    OptionSpec::free("order"),
    OptionSpec::free("missing"),
    OptionSpec::free("include"),
    OptionSpec::free("exclude"),
    OptionSpec::checked("execution_hint", terms_execution_hint),
]);

const GEO_DISTANCE_OPTIONS: OptionSet = OptionSet::Only(&[
    OptionSpec::free("origin"),
    OptionSpec::checked("unit", distance_unit),
    OptionSpec::checked("distance_type", distance_type),
    OptionSpec::free("ranges"),
    OptionSpec::free("keyed"),
]);

const SAMPLER_OPTIONS: OptionSet = OptionSet::Only(&[
    OptionSpec::free("shard_size"),
    OptionSpec::free("max_docs_per_value"),
    OptionSpec::checked("execution_hint", execution_hint),
]);

aggregation_builder! {
    /// One bucket per unique value of the field.
    ///
    /// ```
    /// use querycraft::{AvgAggregation, TermsAggregation};
    /// use serde_json::json;
    ///
    /// let agg = TermsAggregation::new("by_category")
    ///     .field("category")
    ///     .size(5)
    ///     .agg(AvgAggregation::new("avg_price").field("price"));
    ///
    /// assert_eq!(
    ///     agg.to_document(),
    ///     json!({
    ///         "terms": { "field": "category", "size": 5 },
    ///         "aggs": { "avg_price": { "avg": { "field": "price" } } }
    ///     })
    /// );
    /// ```
    TermsAggregation
}

impl TermsAggregation {
    /// Creates a terms aggregation.
    pub fn new(name: impl Into<String>) -> Self {
        TermsAggregation(AggregationNode::from_options(name, "terms", TERMS_OPTIONS))
    }

    /// Number of buckets returned.
    pub fn size(mut self, size: u64) -> Self {
        self.0.put("size", size);
        self
    }

    /// Number of candidate buckets each shard returns.
    pub fn shard_size(mut self, size: u64) -> Self {
        self.0.put("shard_size", size);
        self
    }

    /// Minimum document count for a bucket to be returned.
    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.0.put("min_doc_count", count);
        self
    }

    /// Bucket ordering, e.g. `json!({ "_count": "asc" })`.
    pub fn order(mut self, order: impl Into<WireValue>) -> Self {
        self.0.put("order", order);
        self
    }

    /// Value used for documents without the field.
    pub fn missing(mut self, value: impl Into<WireValue>) -> Self {
        self.0.put("missing", value);
        self
    }

    /// Terms to include: a regex string or an array of exact values.
    pub fn include(mut self, include: impl Into<WireValue>) -> Self {
        self.0.put("include", include);
        self
    }

    /// Terms to exclude: a regex string or an array of exact values.
    pub fn exclude(mut self, exclude: impl Into<WireValue>) -> Self {
        self.0.put("exclude", exclude);
        self
    }

    /// Collection mechanism: `map` or `global_ordinals`.
    pub fn execution_hint(mut self, hint: &str) -> Result<Self> {
        self.0.set_option("execution_hint", hint)?;
        Ok(self)
    }
}

aggregation_builder! {
    /// Buckets documents by distance rings around an origin point.
    ///
    /// ```
    /// use querycraft::GeoDistanceAggregation;
    /// use serde_json::json;
    ///
    /// let agg = GeoDistanceAggregation::new("rings", "52.3760, 4.894")
    ///     .field("location")
    ///     .unit("km")?
    ///     .range(None, Some(100.0))
    ///     .range(Some(100.0), Some(300.0));
    ///
    /// assert_eq!(
    ///     agg.to_document(),
    ///     json!({
    ///         "geo_distance": {
    ///             "field": "location",
    ///             "origin": "52.3760, 4.894",
    ///             "unit": "km",
    ///             "ranges": [{ "to": 100.0 }, { "from": 100.0, "to": 300.0 }]
    ///         }
    ///     })
    /// );
    /// # Ok::<(), querycraft::QueryError>(())
    /// ```
    GeoDistanceAggregation
}

impl GeoDistanceAggregation {
    /// Creates a geo-distance aggregation around `origin`.
    ///
    /// The origin may be a `"lat, lon"` string, a `[lon, lat]` array or a
    /// `{ "lat": .., "lon": .. }` object.
    pub fn new(name: impl Into<String>, origin: impl Into<WireValue>) -> Self {
        let mut node = AggregationNode::from_options(name, "geo_distance", GEO_DISTANCE_OPTIONS);
        node.put("origin", origin);
        GeoDistanceAggregation(node)
    }

    /// Distance unit for the ranges (`km`, `mi`, `NM`, ...).
    pub fn unit(mut self, unit: &str) -> Result<Self> {
        self.0.set_option("unit", unit)?;
        Ok(self)
    }

    /// Distance calculation: `arc` (default) or `plane`.
    pub fn distance_type(mut self, kind: &str) -> Result<Self> {
        self.0.set_option("distance_type", kind)?;
        Ok(self)
    }

    /// Appends a distance range; either bound may be open.
    pub fn range(mut self, from: Option<f64>, to: Option<f64>) -> Self {
        let mut range = Map::new();
        if let Some(from) = from {
            range.insert("from".to_string(), WireValue::from(from));
        }
        if let Some(to) = to {
            range.insert("to".to_string(), WireValue::from(to));
        }
        match self.0.option_mut("ranges") {
            Some(WireValue::Array(ranges)) => ranges.push(WireValue::Object(range)),
            _ => self.0.put("ranges", vec![WireValue::Object(range)]),
        }
        self
    }

    /// Returns buckets as an object keyed by range instead of an array.
    pub fn keyed(mut self, keyed: bool) -> Self {
        self.0.put("keyed", keyed);
        self
    }
}

aggregation_builder! {
    /// Restricts sub-aggregations to a diverse sample of top-scoring documents.
    DiversifiedSamplerAggregation
}

impl DiversifiedSamplerAggregation {
    /// Creates a diversified sampler aggregation.
    pub fn new(name: impl Into<String>) -> Self {
        DiversifiedSamplerAggregation(AggregationNode::from_options(
            name,
            "diversified_sampler",
            SAMPLER_OPTIONS,
        ))
    }

    /// Number of top-scoring documents sampled per shard.
    pub fn shard_size(mut self, size: u64) -> Self {
        self.0.put("shard_size", size);
        self
    }

    /// Maximum number of documents sharing a value.
    pub fn max_docs_per_value(mut self, max: u64) -> Self {
        self.0.put("max_docs_per_value", max);
        self
    }

    /// De-duplication mechanism: `map`, `global_ordinals`,
    /// `global_ordinals_hash` or `global_ordinals_low_cardinality`.
    pub fn execution_hint(mut self, hint: &str) -> Result<Self> {
        self.0.set_option("execution_hint", hint)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::MaxAggregation;
    use crate::error::QueryError;
    use serde_json::json;

    #[test]
    fn terms_execution_hint_subset() {
        assert!(TermsAggregation::new("t").execution_hint("map").is_ok());
        assert!(TermsAggregation::new("t")
            .execution_hint("global_ordinals_hash")
            .is_err());
    }

    #[test]
    fn terms_order_and_filters() {
        let agg = TermsAggregation::new("genres")
            .field("genre")
            .order(json!({ "_count": "asc" }))
            .include(json!(["rock", "jazz"]))
            .min_doc_count(2);
        assert_eq!(
            agg.to_document(),
            json!({
                "terms": {
                    "field": "genre",
                    "order": { "_count": "asc" },
                    "include": ["rock", "jazz"],
                    "min_doc_count": 2
                }
            })
        );
    }

    #[test]
    fn geo_distance_rejects_unknown_unit() {
        let err = GeoDistanceAggregation::new("rings", "0, 0")
            .unit("furlongs")
            .unwrap_err();
        match err {
            QueryError::InvalidOptionValue {
                option, context, ..
            } => {
                assert_eq!(option, "unit");
                assert_eq!(context, "geo_distance aggregation");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn geo_distance_type_normalized() {
        let agg = GeoDistanceAggregation::new("rings", "0, 0")
            .distance_type("PLANE")
            .unwrap();
        assert_eq!(agg.to_document()["geo_distance"]["distance_type"], json!("plane"));
    }

    #[test]
    fn sampler_accepts_low_cardinality_hint() {
        let agg = DiversifiedSamplerAggregation::new("sample")
            .field("author")
            .shard_size(200)
            .execution_hint("global_ordinals_low_cardinality")
            .unwrap()
            .agg(MaxAggregation::new("top").field("likes"));
        assert_eq!(
            agg.to_document(),
            json!({
                "diversified_sampler": {
                    "field": "author",
                    "shard_size": 200,
                    "execution_hint": "global_ordinals_low_cardinality"
                },
                "aggs": { "top": { "max": { "field": "likes" } } }
            })
        );
    }

    #[test]
    fn sampler_rejects_truncated_hint() {
        assert!(DiversifiedSamplerAggregation::new("sample")
            .execution_hint("global_ordinals_low_cardinalit")
            .is_err());
    }
}
