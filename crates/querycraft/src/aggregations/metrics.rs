//! Single-value metrics aggregations.
//!
//! These compute one statistic over numeric values taken from a field or
//! produced by a script. They accept `missing` (value used for documents
//! lacking the field) and `format` (output format of the value string).

use crate::aggregation::AggregationNode;
use crate::kind::{OptionSet, OptionSpec};
use crate::WireValue;

const METRIC_OPTIONS: OptionSet =
    OptionSet::Only(&[OptionSpec::free("missing"), OptionSpec::free("format")]);

macro_rules! metric {
    ($(#[$attr:meta])* $name:ident, $tag:literal) => {
        aggregation_builder! {
            $(#[$attr])*
            $name
        }

        impl $name {
            #[doc = concat!("Creates a `", $tag, "` aggregation.")]
            pub fn new(name: impl Into<String>) -> Self {
                $name(AggregationNode::from_options(name, $tag, METRIC_OPTIONS))
            }

            /// Value used for documents without the field.
            pub fn missing(mut self, value: impl Into<WireValue>) -> Self {
                self.0.put("missing", value);
                self
            }

            /// Format pattern for the value as string.
            pub fn format(mut self, format: impl Into<String>) -> Self {
                self.0.put("format", format.into());
                self
            }
        }
    };
}

metric! {
    /// Minimum of the aggregated values.
    ///
    /// ```
    /// use querycraft::MinAggregation;
    /// use serde_json::json;
    ///
    /// let agg = MinAggregation::new("min_price").field("price").missing(0);
    /// assert_eq!(agg.to_document(), json!({ "min": { "field": "price", "missing": 0 } }));
    /// ```
    MinAggregation, "min"
}

metric! {
    /// Maximum of the aggregated values.
    MaxAggregation, "max"
}

metric! {
    /// Average of the aggregated values.
    AvgAggregation, "avg"
}

metric! {
    /// Sum of the aggregated values.
    SumAggregation, "sum"
}

metric! {
    /// Number of values extracted from the aggregated documents.
    ValueCountAggregation, "value_count"
}
