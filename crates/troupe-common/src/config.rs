//! Opaque key-value configuration store passed to agents
//!
//! Routing logic does not consult any key today; the store exists so callers
//! can thread settings through agent construction without API churn.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Key-value configuration handed to agents at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    entries: HashMap<String, Value>,
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a configuration value, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get a configuration value, falling back to `default` if absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.entries.get(key).unwrap_or(default)
    }

    /// Get a string value, if the key exists and holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Set a configuration value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge all entries from `other` into this configuration.
    pub fn update(&mut self, other: HashMap<String, Value>) {
        self.entries.extend(other);
    }

    /// Number of configured keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, Value>> for Config {
    fn from(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Config {
    fn from(pairs: [(&str, Value); N]) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_set_update_roundtrip() {
        let mut config = Config::from([("model", json!("qwen-plus")), ("temperature", json!(0.7))]);
        assert_eq!(config.get_str("model"), Some("qwen-plus"));
        assert_eq!(config.get("temperature"), Some(&json!(0.7)));

        config.set("temperature", json!(0.5));
        assert_eq!(config.get("temperature"), Some(&json!(0.5)));

        let mut extra = HashMap::new();
        extra.insert("max_tokens".to_string(), json!(1000));
        config.update(extra);
        assert_eq!(config.get("max_tokens"), Some(&json!(1000)));
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn missing_key_falls_back() {
        let config = Config::new();
        assert!(config.get("model").is_none());
        let default = json!("fallback");
        assert_eq!(config.get_or("model", &default), &default);
    }
}
