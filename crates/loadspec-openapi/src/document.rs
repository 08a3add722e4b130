//! Generic document tree for parsed OpenAPI input.
//!
//! Nodes are plain [`serde_json::Value`]s built with `preserve_order`, so
//! mappings keep their declaration order. YAML input is normalized into the
//! same shape: non-string keys are stringified and tags are dropped.

use crate::error::{OpenApiError, Result};
use crate::pointer::{JsonPointer, PointerError};
use crate::resolver::{self, Resolution};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// An immutable, parsed OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse raw text as JSON, falling back to YAML.
    pub fn parse(text: &str) -> Result<Self> {
        let root = match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(json_err) => {
                debug!("Input is not JSON ({}), trying YAML", json_err);
                let mut yaml: serde_yaml::Value = serde_yaml::from_str(text)
                    .map_err(|e| OpenApiError::ParseFailure(e.to_string()))?;
                // `<<: *anchor` merge keys
                yaml.apply_merge()
                    .map_err(|e| OpenApiError::ParseFailure(e.to_string()))?;
                from_yaml(yaml)
            }
        };

        Ok(Self { root })
    }

    /// Wrap an already-built tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Walk a document-local pointer from the root.
    pub fn lookup(&self, pointer: &JsonPointer) -> std::result::Result<&Value, PointerError> {
        pointer.walk(&self.root)
    }

    /// Resolve every `$ref` inside `node` against this document.
    pub fn resolve(&self, node: &Value) -> Resolution {
        resolver::resolve(self, node, 0)
    }
}

/// Convert a YAML tree into the document representation.
fn from_yaml(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), from_yaml(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        // NaN and infinities have no JSON form
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Mapping keys such as unquoted `200:` response codes arrive as numbers.
fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => from_yaml(other).to_string(),
    }
}
