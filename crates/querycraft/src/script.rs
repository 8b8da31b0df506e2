//! Script value sources for aggregations.

use serde::Serialize;
use serde_json::Map;

use crate::WireValue;

/// A script that produces the values an aggregation works on.
///
/// Either inline (`source`) or stored (`id`), with optional language and
/// parameters.
///
/// ```
/// use querycraft::Script;
/// use serde_json::json;
///
/// let script = Script::inline("doc['price'].value * params.rate")
///     .lang("painless")
///     .param("rate", 1.2);
///
/// assert_eq!(
///     serde_json::to_value(&script).unwrap(),
///     json!({
///         "source": "doc['price'].value * params.rate",
///         "lang": "painless",
///         "params": { "rate": 1.2 }
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Script {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    params: Map<String, WireValue>,
}

impl Script {
    /// Creates an inline script.
    pub fn inline(source: impl Into<String>) -> Self {
        Script {
            source: Some(source.into()),
            id: None,
            lang: None,
            params: Map::new(),
        }
    }

    /// Creates a reference to a stored script.
    pub fn stored(id: impl Into<String>) -> Self {
        Script {
            source: None,
            id: Some(id.into()),
            lang: None,
            params: Map::new(),
        }
    }

    /// Sets the script language.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Adds a script parameter. Repeated names overwrite in place.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<WireValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub(crate) fn to_value(&self) -> WireValue {
        let mut body = Map::new();
        if let Some(source) = &self.source {
            body.insert("source".to_string(), WireValue::from(source.as_str()));
        }
        if let Some(id) = &self.id {
            body.insert("id".to_string(), WireValue::from(id.as_str()));
        }
        if let Some(lang) = &self.lang {
            body.insert("lang".to_string(), WireValue::from(lang.as_str()));
        }
        if !self.params.is_empty() {
            body.insert("params".to_string(), WireValue::Object(self.params.clone()));
        }
        WireValue::Object(body)
    }
}

impl From<&str> for Script {
    fn from(source: &str) -> Self {
        Script::inline(source)
    }
}

impl From<String> for Script {
    fn from(source: String) -> Self {
        Script::inline(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_script_omits_source() {
        let script = Script::stored("calc-score").param("factor", 2);
        assert_eq!(
            script.to_value(),
            json!({ "id": "calc-score", "params": { "factor": 2 } })
        );
    }

    #[test]
    fn to_value_matches_serde_output() {
        let script = Script::inline("_value * 2").lang("painless");
        assert_eq!(script.to_value(), serde_json::to_value(&script).unwrap());
    }

    #[test]
    fn from_str_is_inline() {
        let script: Script = "doc['a'].value".into();
        assert_eq!(script.to_value(), json!({ "source": "doc['a'].value" }));
    }
}
