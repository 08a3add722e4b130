//! # loadspec OpenAPI endpoint extraction
//!
//! Turns an OpenAPI (or Swagger) description into a flat list of endpoint
//! descriptors ready to drive load-test scenarios.
//!
//! ## Features
//!
//! - Parse JSON or YAML documents into an order-preserving tree
//! - Resolve document-local `$ref` pointers, bounded against cycles
//! - Merge path-level and operation-level parameters
//! - Pick or synthesize an example request body for every operation
//!
//! ## Example
//!
//! ```
//! use loadspec_openapi::parse_document;
//!
//! let yaml = r#"
//! paths:
//!   /pets:
//!     get:
//!       summary: List pets
//!       parameters:
//!         - name: limit
//!           in: query
//!           schema:
//!             type: integer
//! "#;
//!
//! let endpoints = parse_document(yaml)?;
//! assert_eq!(endpoints.len(), 1);
//! assert_eq!(endpoints[0].method.as_str(), "GET");
//! # Ok::<(), loadspec_openapi::OpenApiError>(())
//! ```

mod document;
mod error;
mod parser;
mod pointer;
pub mod resolver;
pub mod sample;
mod types;

pub use document::Document;
pub use error::{OpenApiError, Result};
pub use parser::{OpenApiParser, extract};
pub use pointer::{JsonPointer, PointerError};
pub use resolver::{Resolution, UnresolvedReason, UnresolvedRef};
pub use sample::synthesize;
pub use types::{EndpointDescriptor, HttpMethod, ParameterDescriptor, ParameterLocation};

/// Parse raw JSON or YAML text and extract every endpoint it declares.
///
/// Fails with [`OpenApiError::ParseFailure`] when the text does not parse and
/// with [`OpenApiError::InvalidDocument`] when its root is not a mapping.
pub fn parse_document(text: &str) -> Result<Vec<EndpointDescriptor>> {
    Ok(OpenApiParser::from_str(text)?.parse())
}
