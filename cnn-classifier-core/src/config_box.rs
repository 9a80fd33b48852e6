//! Read-only, schema-less configuration mapping.
//!
//! `ConfigBox` is what `read_yaml` and `load_json` hand back: a string-keyed
//! mapping with dotted-path lookup. Anything with a known shape should be
//! pulled out of it with [`ConfigBox::extract`] rather than read key by key.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An immutable mapping from string keys to (possibly nested) values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigBox(Map<String, Value>);

impl ConfigBox {
    /// Wrap a parsed document. Only mappings are accepted.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(ConfigError::Invalid {
                message: "document has no content".to_string(),
            }),
            other => Err(ConfigError::Invalid {
                message: format!("expected a mapping at the top level, found {}", type_name(&other)),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a nested value by dotted path, e.g. `data_ingestion.root_dir`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get_path(path).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get_path(path).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get_path(path).and_then(Value::as_bool)
    }

    /// A nested mapping as its own box. Returns `None` for scalars and lists.
    pub fn section(&self, path: &str) -> Option<ConfigBox> {
        self.get_path(path)
            .and_then(Value::as_object)
            .map(|map| ConfigBox(map.clone()))
    }

    /// Deserialize the whole mapping into a typed structure.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ConfigBox {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
