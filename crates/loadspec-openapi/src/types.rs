//! Data structures produced by endpoint extraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods that produce endpoint descriptors, in emission order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Fixed per-path order in which operations are emitted.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Key of the operation inside a path item (`get`, `post`, ...).
    pub fn operation_key(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location where a parameter appears in the request.
///
/// Values outside the four OpenAPI 3 locations (Swagger 2 `body` or
/// `formData`, typos) are kept verbatim in `Other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "String", from = "String")]
pub enum ParameterLocation {
    /// Query parameter (e.g., ?search=value)
    Query,
    /// Path parameter (e.g., /users/{id})
    Path,
    /// Header parameter (e.g., X-Custom-Header)
    Header,
    /// Cookie parameter
    Cookie,
    Other(String),
}

impl From<&str> for ParameterLocation {
    fn from(value: &str) -> Self {
        match value {
            "query" => ParameterLocation::Query,
            "path" => ParameterLocation::Path,
            "header" => ParameterLocation::Header,
            "cookie" => ParameterLocation::Cookie,
            other => ParameterLocation::Other(other.to_string()),
        }
    }
}

impl From<String> for ParameterLocation {
    fn from(value: String) -> Self {
        ParameterLocation::from(value.as_str())
    }
}

impl From<ParameterLocation> for String {
    fn from(location: ParameterLocation) -> Self {
        location.to_string()
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Cookie => write!(f, "cookie"),
            ParameterLocation::Other(other) => write!(f, "{}", other),
        }
    }
}

/// A parameter merged from path-level and operation-level declarations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    /// Declared schema type, `"string"` when the schema has none
    pub schema_type: String,
    pub description: Option<String>,
    /// Parameter example, falling back to the schema's example
    pub example: Option<Value>,
}

/// One (path, method) operation, flattened and dereferenced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// Path template (e.g., "/users/{id}")
    pub path: String,
    pub method: HttpMethod,
    /// Operation summary, or its description, or empty
    pub summary: String,
    /// Path-level parameters followed by operation-level ones
    pub parameters: Vec<ParameterDescriptor>,
    /// Example request payload, taken from the document or synthesized
    pub request_body: Option<Value>,
}
