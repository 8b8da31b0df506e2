//! Serializer configuration.
//!
//! [`WireConfig`] controls the few wire-format choices that differ between
//! engine versions and client conventions. It derives `Deserialize` with
//! field defaults, so applications can embed it in their own configuration
//! files.
//!
//! ```
//! use querycraft::{AggsKey, WireConfig};
//!
//! let config: WireConfig = serde_json::from_str(r#"{ "aggs_key": "aggregations" }"#).unwrap();
//! assert_eq!(config.aggs_key, AggsKey::Aggregations);
//!
//! let config: WireConfig = serde_json::from_str("{}").unwrap();
//! assert_eq!(config, WireConfig::default());
//! ```

use serde::{Deserialize, Serialize};

/// Key under which sub-aggregations are nested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggsKey {
    /// `aggs`
    #[default]
    Aggs,
    /// `aggregations`
    Aggregations,
}

impl AggsKey {
    /// Returns the wire key.
    pub fn as_str(self) -> &'static str {
        match self {
            AggsKey::Aggs => "aggs",
            AggsKey::Aggregations => "aggregations",
        }
    }
}

impl std::fmt::Display for AggsKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wire-format options applied when serializing nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// Key for nested aggregations.
    pub aggs_key: AggsKey,
}

impl WireConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sub-aggregation key.
    pub fn aggs_key(mut self, key: AggsKey) -> Self {
        self.aggs_key = key;
        self
    }
}
