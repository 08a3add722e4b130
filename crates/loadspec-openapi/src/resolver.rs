//! `$ref` resolution over a [`Document`].
//!
//! Resolution is best-effort: a pointer that cannot be followed leaves the
//! original `{"$ref": ...}` node in place and is reported in the returned
//! [`Resolution`] instead of failing the caller. Recursion is bounded by
//! [`MAX_RESOLVE_DEPTH`], which is also what stops cyclic references.

use crate::document::Document;
use crate::pointer::{JsonPointer, PointerError};
use serde_json::Value;
use tracing::{error, warn};

/// Deepest level at which nodes are still resolved.
pub const MAX_RESOLVE_DEPTH: usize = 10;

const REF_KEY: &str = "$ref";

/// Why a reference was left in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Not a `#/` pointer; other documents are never fetched.
    External,
    /// The `$ref` value is not a string.
    Malformed,
    /// A pointer segment does not exist in the document.
    MissingSegment(String),
    /// A pointer index is past the end of a sequence.
    IndexOutOfRange(usize),
    /// The depth bound was reached before this reference was followed.
    DepthExceeded,
}

/// A reference that survived resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    pub pointer: String,
    pub reason: UnresolvedReason,
}

/// Outcome of resolving a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The resolved tree.
    pub value: Value,
    /// References left in `value`, in the order they were met.
    pub unresolved: Vec<UnresolvedRef>,
}

impl Resolution {
    /// True when no `$ref` was left behind.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Resolve every `$ref` in `node` against `document`, starting at `depth`.
///
/// The document is never modified; the result is a fresh tree.
pub fn resolve(document: &Document, node: &Value, depth: usize) -> Resolution {
    let mut unresolved = Vec::new();
    let value = resolve_node(document, node, depth, &mut unresolved);
    Resolution { value, unresolved }
}

fn resolve_node(
    document: &Document,
    node: &Value,
    depth: usize,
    unresolved: &mut Vec<UnresolvedRef>,
) -> Value {
    if depth > MAX_RESOLVE_DEPTH {
        collect_refs(node, unresolved);
        return node.clone();
    }

    match node {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_node(document, item, depth + 1, unresolved))
                .collect(),
        ),
        Value::Object(map) => match map.get(REF_KEY) {
            Some(reference) => follow_ref(document, node, reference, depth, unresolved),
            None => Value::Object(
                map.iter()
                    .map(|(key, value)| {
                        (
                            key.clone(),
                            resolve_node(document, value, depth + 1, unresolved),
                        )
                    })
                    .collect(),
            ),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => node.clone(),
    }
}

fn follow_ref(
    document: &Document,
    node: &Value,
    reference: &Value,
    depth: usize,
    unresolved: &mut Vec<UnresolvedRef>,
) -> Value {
    let Value::String(raw) = reference else {
        warn!("Ignoring non-string $ref: {}", reference);
        unresolved.push(UnresolvedRef {
            pointer: reference.to_string(),
            reason: UnresolvedReason::Malformed,
        });
        return node.clone();
    };

    let Some(pointer) = JsonPointer::parse(raw) else {
        unresolved.push(UnresolvedRef {
            pointer: raw.clone(),
            reason: UnresolvedReason::External,
        });
        return node.clone();
    };

    match document.lookup(&pointer) {
        Ok(target) => resolve_node(document, target, depth + 1, unresolved),
        Err(PointerError::MissingSegment(segment)) => {
            warn!("Could not resolve ref part: {} in {}", segment, pointer);
            unresolved.push(UnresolvedRef {
                pointer: raw.clone(),
                reason: UnresolvedReason::MissingSegment(segment),
            });
            node.clone()
        }
        Err(PointerError::IndexOutOfRange(index)) => {
            error!("Error resolving ref {}: index {} out of range", pointer, index);
            unresolved.push(UnresolvedRef {
                pointer: raw.clone(),
                reason: UnresolvedReason::IndexOutOfRange(index),
            });
            node.clone()
        }
    }
}

/// Record every `$ref` left below the depth bound.
fn collect_refs(node: &Value, unresolved: &mut Vec<UnresolvedRef>) {
    match node {
        Value::Array(items) => items.iter().for_each(|item| collect_refs(item, unresolved)),
        Value::Object(map) => match map.get(REF_KEY) {
            Some(reference) => unresolved.push(UnresolvedRef {
                pointer: reference
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| reference.to_string()),
                reason: UnresolvedReason::DepthExceeded,
            }),
            None => map.values().for_each(|value| collect_refs(value, unresolved)),
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn doc(value: Value) -> Document {
        Document::from_value(value)
    }

    /// `{"r0": {"$ref": "#/r1"}, ..., "r{n-1}": {"$ref": "#/end"}, "end": "done"}`
    fn chain(len: usize) -> Document {
        let mut root = serde_json::Map::new();
        for i in 0..len {
            let next = if i + 1 == len {
                "#/end".to_string()
            } else {
                format!("#/r{}", i + 1)
            };
            root.insert(format!("r{}", i), json!({ "$ref": next }));
        }
        root.insert("end".to_string(), json!("done"));
        doc(Value::Object(root))
    }

    #[test]
    fn test_ref_free_tree_is_unchanged() {
        let node = json!({
            "type": "object",
            "properties": {"id": {"type": "integer"}, "tags": {"type": "array", "items": {"type": "string"}}},
            "list": [1, "two", null, true]
        });
        let document = doc(json!({"components": {}}));
        let resolution = resolve(&document, &node, 0);
        assert_eq!(resolution.value, node);
        assert!(resolution.is_complete());
    }

    #[test]
    fn test_resolves_nested_refs() {
        let document = doc(json!({
            "components": {"schemas": {
                "Pet": {"type": "object", "properties": {"owner": {"$ref": "#/components/schemas/Owner"}}},
                "Owner": {"type": "string"}
            }}
        }));
        let node = json!({"schema": {"$ref": "#/components/schemas/Pet"}});
        let resolution = resolve(&document, &node, 0);
        assert_eq!(
            resolution.value,
            json!({"schema": {"type": "object", "properties": {"owner": {"type": "string"}}}})
        );
        assert!(resolution.is_complete());
    }

    #[test]
    fn test_short_chain_resolves_to_scalar() {
        let document = chain(3);
        let resolution = resolve(&document, &json!({"$ref": "#/r0"}), 0);
        assert_eq!(resolution.value, json!("done"));
    }

    #[test]
    fn test_chain_at_depth_bound_still_resolves() {
        // The entry ref plus ten links: eleven hops in total
        let document = chain(10);
        let resolution = resolve(&document, &json!({"$ref": "#/r0"}), 0);
        assert_eq!(resolution.value, json!("done"));
        assert!(resolution.is_complete());
    }

    #[test]
    fn test_chain_one_past_depth_bound_keeps_residual_ref() {
        let document = chain(11);
        let resolution = resolve(&document, &json!({"$ref": "#/r0"}), 0);
        assert_eq!(resolution.value, json!({"$ref": "#/end"}));
        assert_eq!(
            resolution.unresolved.last().map(|r| &r.reason),
            Some(&UnresolvedReason::DepthExceeded)
        );
    }

    #[test]
    fn test_long_chain_stops_at_depth_bound() {
        let document = chain(20);
        let resolution = resolve(&document, &json!({"$ref": "#/r0"}), 0);
        assert!(resolution.value.get(REF_KEY).is_some());
        assert_eq!(
            resolution.unresolved.last().map(|r| &r.reason),
            Some(&UnresolvedReason::DepthExceeded)
        );
    }

    #[test]
    fn test_self_cycle_terminates() {
        let document = doc(json!({"a": {"$ref": "#/a"}}));
        let started = Instant::now();
        let resolution = resolve(&document, &json!({"$ref": "#/a"}), 0);
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(resolution.value, json!({"$ref": "#/a"}));
        assert!(!resolution.is_complete());
    }

    #[test]
    fn test_missing_target_returns_original_node() {
        let document = doc(json!({"components": {"schemas": {}}}));
        let node = json!({"$ref": "#/components/schemas/Nope", "description": "kept"});
        let resolution = resolve(&document, &node, 0);
        assert_eq!(resolution.value, node);
        assert_eq!(
            resolution.unresolved,
            vec![UnresolvedRef {
                pointer: "#/components/schemas/Nope".to_string(),
                reason: UnresolvedReason::MissingSegment("Nope".to_string()),
            }]
        );
    }

    #[test]
    fn test_external_ref_left_untouched() {
        let document = doc(json!({}));
        let node = json!({"$ref": "common.yaml#/Pet"});
        let resolution = resolve(&document, &node, 0);
        assert_eq!(resolution.value, node);
        assert_eq!(resolution.unresolved[0].reason, UnresolvedReason::External);
    }

    #[test]
    fn test_sequence_index_segments() {
        let document = doc(json!({"servers": [{"url": "a"}, {"url": "b"}]}));
        let resolution = resolve(&document, &json!({"$ref": "#/servers/1"}), 0);
        assert_eq!(resolution.value, json!({"url": "b"}));

        let out_of_range = resolve(&document, &json!({"$ref": "#/servers/9"}), 0);
        assert_eq!(out_of_range.value, json!({"$ref": "#/servers/9"}));
        assert_eq!(
            out_of_range.unresolved[0].reason,
            UnresolvedReason::IndexOutOfRange(9)
        );
    }

    #[test]
    fn test_non_string_ref_is_malformed() {
        let document = doc(json!({}));
        let node = json!({"$ref": 42});
        let resolution = resolve(&document, &node, 0);
        assert_eq!(resolution.value, node);
        assert_eq!(resolution.unresolved[0].reason, UnresolvedReason::Malformed);
    }

    #[test]
    fn test_depth_past_bound_returns_node() {
        let document = doc(json!({"a": 1}));
        let node = json!({"$ref": "#/a"});
        let resolution = resolve(&document, &node, MAX_RESOLVE_DEPTH + 1);
        assert_eq!(resolution.value, node);
    }

    #[test]
    fn test_document_is_not_mutated() {
        let root = json!({"a": {"$ref": "#/b"}, "b": {"c": 1}});
        let document = doc(root.clone());
        let _ = resolve(&document, document.root(), 0);
        assert_eq!(document.root(), &root);
    }
}
