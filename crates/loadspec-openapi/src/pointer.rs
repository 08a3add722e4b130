//! Document-local JSON pointers (`#/a/b/c`).

use serde_json::Value;
use std::fmt;

/// Why a pointer could not be walked to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// The segment names a key, or an index, that is not there.
    MissingSegment(String),
    /// The segment is a valid index but past the end of the sequence.
    IndexOutOfRange(usize),
}

impl fmt::Display for PointerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerError::MissingSegment(segment) => write!(f, "missing segment '{}'", segment),
            PointerError::IndexOutOfRange(index) => write!(f, "index {} out of range", index),
        }
    }
}

/// A parsed `#/`-prefixed pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPointer {
    raw: String,
    segments: Vec<String>,
}

impl JsonPointer {
    /// Parse a `$ref` value. Returns `None` for anything that is not
    /// document-local.
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix("#/")?;
        let segments = rest.split('/').map(unescape).collect();
        Some(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Follow the pointer from `root`.
    pub fn walk<'a>(&self, root: &'a Value) -> Result<&'a Value, PointerError> {
        let mut current = root;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map
                    .get(segment)
                    .ok_or_else(|| PointerError::MissingSegment(segment.clone()))?,
                Value::Array(items) => {
                    let index = parse_index(segment)
                        .ok_or_else(|| PointerError::MissingSegment(segment.clone()))?;
                    items
                        .get(index)
                        .ok_or(PointerError::IndexOutOfRange(index))?
                }
                _ => return Err(PointerError::MissingSegment(segment.clone())),
            };
        }
        Ok(current)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `~1` is `/` and `~0` is `~`, decoded in that order.
fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
