//! Example synthesis from schema fragments.
//!
//! Given a resolved schema, [`synthesize`] returns a representative value
//! using a fixed priority: `default`, then `example`, then the first entry of
//! `examples`, then a placeholder derived from `type`/`format`, then the first
//! `enum` member. The result is deterministic for a given schema.

use serde_json::{Map, Value, json};

/// Deepest level at which a schema is still sampled.
pub const MAX_SAMPLE_DEPTH: usize = 5;

pub const SAMPLE_DATE_TIME: &str = "2024-01-01T12:00:00Z";
pub const SAMPLE_DATE: &str = "2024-01-01";
pub const SAMPLE_EMAIL: &str = "user@example.com";
pub const SAMPLE_UUID: &str = "123e4567-e89b-12d3-a456-426614174000";
pub const SAMPLE_STRING: &str = "sample_string";

/// Produce a sample for `schema`, or `Value::Null` when nothing fits.
pub fn synthesize(schema: &Value, depth: usize) -> Value {
    if depth > MAX_SAMPLE_DEPTH {
        return Value::Null;
    }

    let Value::Object(schema) = schema else {
        return Value::Null;
    };

    if let Some(default) = schema.get("default") {
        return default.clone();
    }

    if let Some(example) = schema.get("example") {
        return example.clone();
    }

    if let Some(example) = schema.get("examples").and_then(first_example) {
        return example;
    }

    match declared_type(schema) {
        Some("object") => {
            let sample: Map<String, Value> = match schema.get("properties") {
                Some(Value::Object(properties)) => properties
                    .iter()
                    .map(|(name, property)| (name.clone(), synthesize(property, depth + 1)))
                    .collect(),
                _ => Map::new(),
            };
            return Value::Object(sample);
        }
        Some("array") => {
            let item = match schema.get("items") {
                Some(items) => synthesize(items, depth + 1),
                None => synthesize(&json!({}), depth + 1),
            };
            return Value::Array(vec![item]);
        }
        Some("string") => {
            let sample = match schema.get("format").and_then(Value::as_str) {
                Some("date-time") => SAMPLE_DATE_TIME,
                Some("date") => SAMPLE_DATE,
                Some("email") => SAMPLE_EMAIL,
                Some("uuid") => SAMPLE_UUID,
                _ => SAMPLE_STRING,
            };
            return Value::String(sample.to_string());
        }
        Some("integer") => return json!(1),
        Some("number") => return json!(1.0),
        Some("boolean") => return Value::Bool(true),
        _ => {}
    }

    match schema.get("enum") {
        Some(Value::Array(values)) if !values.is_empty() => values[0].clone(),
        _ => Value::Null,
    }
}

/// First entry of an `examples` keyword.
///
/// Sequences yield their first element. Mappings (OpenAPI named examples)
/// yield their first-inserted entry, unwrapped to its `value` when present.
pub fn first_example(examples: &Value) -> Option<Value> {
    match examples {
        Value::Array(items) => items.first().cloned(),
        Value::Object(named) => {
            let first = named.values().next()?;
            match first {
                Value::Object(entry) if entry.contains_key("value") => entry.get("value").cloned(),
                other => Some(other.clone()),
            }
        }
        _ => None,
    }
}

/// The schema's `type`. For a list of types, the first one that is not
/// `"null"`.
pub(crate) fn declared_type(schema: &Map<String, Value>) -> Option<&str> {
    match schema.get("type")? {
        Value::String(name) => Some(name.as_str()),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .find(|name| *name != "null"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_beats_example() {
        let schema = json!({"type": "integer", "default": 7, "example": 3});
        assert_eq!(synthesize(&schema, 0), json!(7));
    }

    #[test]
    fn test_example_beats_type() {
        let schema = json!({"type": "string", "example": "rex"});
        assert_eq!(synthesize(&schema, 0), json!("rex"));
    }

    #[test]
    fn test_examples_sequence_and_mapping() {
        assert_eq!(
            synthesize(&json!({"examples": ["first", "second"]}), 0),
            json!("first")
        );
        assert_eq!(
            synthesize(
                &json!({"examples": {"cat": {"summary": "a cat", "value": {"name": "tom"}}, "dog": {"value": 2}}}),
                0
            ),
            json!({"name": "tom"})
        );
        assert_eq!(
            synthesize(&json!({"examples": {"plain": "raw"}}), 0),
            json!("raw")
        );
    }

    #[test]
    fn test_empty_examples_fall_through_to_type() {
        assert_eq!(
            synthesize(&json!({"type": "boolean", "examples": []}), 0),
            json!(true)
        );
        assert_eq!(
            synthesize(&json!({"type": "integer", "examples": {}}), 0),
            json!(1)
        );
    }

    #[test]
    fn test_scalar_types() {
        assert_eq!(synthesize(&json!({"type": "integer"}), 0), json!(1));
        assert_eq!(synthesize(&json!({"type": "number"}), 0), json!(1.0));
        assert_eq!(synthesize(&json!({"type": "boolean"}), 0), json!(true));
        assert_eq!(synthesize(&json!({"type": "string"}), 0), json!(SAMPLE_STRING));
    }

    #[test]
    fn test_string_formats() {
        let cases = [
            ("date-time", SAMPLE_DATE_TIME),
            ("date", SAMPLE_DATE),
            ("email", SAMPLE_EMAIL),
            ("uuid", SAMPLE_UUID),
            ("hostname", SAMPLE_STRING),
        ];
        for (format, expected) in cases {
            let schema = json!({"type": "string", "format": format});
            assert_eq!(synthesize(&schema, 0), json!(expected), "format {}", format);
        }
    }

    #[test]
    fn test_object_uses_declared_properties_only() {
        let schema = json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": {"type": "integer"},
                "email": {"type": "string", "format": "email"},
                "nickname": {}
            }
        });
        assert_eq!(
            synthesize(&schema, 0),
            json!({"id": 1, "email": SAMPLE_EMAIL, "nickname": null})
        );
    }

    #[test]
    fn test_object_without_properties_is_empty() {
        assert_eq!(synthesize(&json!({"type": "object"}), 0), json!({}));
    }

    #[test]
    fn test_array_has_single_item() {
        let schema = json!({"type": "array", "minItems": 3, "items": {"type": "string", "format": "uuid"}});
        assert_eq!(synthesize(&schema, 0), json!([SAMPLE_UUID]));
        assert_eq!(synthesize(&json!({"type": "array"}), 0), json!([null]));
    }

    #[test]
    fn test_enum_fallback() {
        assert_eq!(synthesize(&json!({"enum": ["x", "y"]}), 0), json!("x"));
        assert_eq!(synthesize(&json!({"enum": []}), 0), Value::Null);
    }

    #[test]
    fn test_type_list_uses_first_non_null() {
        assert_eq!(synthesize(&json!({"type": ["null", "integer"]}), 0), json!(1));
    }

    #[test]
    fn test_non_mapping_and_unknown_yield_null() {
        assert_eq!(synthesize(&json!("string"), 0), Value::Null);
        assert_eq!(synthesize(&json!({"description": "no hints"}), 0), Value::Null);
    }

    #[test]
    fn test_depth_bound_truncates_nesting() {
        // Seven levels of nested objects; sampling stops below depth 5.
        let mut schema = json!({"type": "integer"});
        for _ in 0..7 {
            schema = json!({"type": "object", "properties": {"child": schema}});
        }
        let sample = synthesize(&schema, 0);
        let mut current = &sample;
        for _ in 0..5 {
            current = &current["child"];
        }
        assert_eq!(current, &json!({"child": null}));
    }
}
