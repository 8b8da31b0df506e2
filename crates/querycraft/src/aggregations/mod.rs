//! Leaf aggregation builders.
//!
//! Each builder wraps an [`AggregationNode`](crate::AggregationNode) whose
//! option table lists what its kind accepts. Builders share the value-source
//! setters (`field`, `script`), `meta` and sub-aggregation nesting (`agg`).

/// Generates a newtype over `AggregationNode` with the shared setters.
macro_rules! aggregation_builder {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone)]
        pub struct $name($crate::aggregation::AggregationNode);

        impl $name {
            /// Sets the field to aggregate on.
            pub fn field(mut self, field: impl Into<String>) -> Self {
                self.0.set_field(field);
                self
            }

            /// Sets the script producing the values to aggregate.
            pub fn script(mut self, script: impl Into<$crate::script::Script>) -> Self {
                self.0.set_script(script);
                self
            }

            /// Attaches metadata returned with the aggregation result.
            pub fn meta(mut self, meta: ::serde_json::Map<String, $crate::WireValue>) -> Self {
                self.0.set_meta(meta);
                self
            }

            /// Nests a sub-aggregation under its own name.
            pub fn agg(mut self, child: impl Into<$crate::aggregation::AggregationNode>) -> Self {
                self.0.add_sub_aggregation(child);
                self
            }

            /// Returns the aggregation name.
            pub fn name(&self) -> &str {
                self.0.name()
            }

            /// Serializes the aggregation body.
            pub fn to_document(&self) -> $crate::WireDocument {
                self.0.to_document()
            }

            /// Returns the underlying node.
            pub fn into_node(self) -> $crate::aggregation::AggregationNode {
                self.0
            }
        }

        impl From<$name> for $crate::aggregation::AggregationNode {
            fn from(agg: $name) -> $crate::aggregation::AggregationNode {
                agg.0
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.0, serializer)
            }
        }
    };
}

mod bucket;
mod metrics;

pub use bucket::{DiversifiedSamplerAggregation, GeoDistanceAggregation, TermsAggregation};
pub use metrics::{
    AvgAggregation, MaxAggregation, MinAggregation, SumAggregation, ValueCountAggregation,
};
