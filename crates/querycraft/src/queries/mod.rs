//! Leaf query clause builders.
//!
//! Every builder wraps a [`ClauseNode`](crate::ClauseNode) configured from a static option
//! table, exposes setters only for the options its kind understands and
//! converts into the generic node with `.into()` for composition.

use crate::kind::OptionSpec;

/// Options every query kind accepts.
const BOOST: OptionSpec = OptionSpec::free("boost");
const NAME: OptionSpec = OptionSpec::free("_name");

/// Generates a newtype over `ClauseNode` with the setters shared by all
/// query kinds.
macro_rules! clause_builder {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone)]
        pub struct $name($crate::clause::ClauseNode);

        impl $name {
            /// Sets the relevance boost of this clause.
            pub fn boost(mut self, factor: f64) -> Self {
                self.0.put("boost", factor);
                self
            }

            /// Names the clause; hits report the names of matching clauses.
            pub fn name(mut self, name: impl Into<String>) -> Self {
                self.0.put("_name", name.into());
                self
            }

            /// Serializes the clause.
            pub fn to_document(&self) -> $crate::WireDocument {
                self.0.to_document()
            }

            /// Returns the underlying node.
            pub fn into_node(self) -> $crate::clause::ClauseNode {
                self.0
            }
        }

        impl From<$name> for $crate::clause::ClauseNode {
            fn from(query: $name) -> $crate::clause::ClauseNode {
                query.0
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

mod compound;
mod match_all;
mod term_level;

pub use compound::BoolQuery;
pub use match_all::MatchAllQuery;
pub use term_level::{ExistsQuery, FuzzyQuery, PrefixQuery, TermQuery, WildcardQuery};
