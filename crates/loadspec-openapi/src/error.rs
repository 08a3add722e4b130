//! Error types for OpenAPI endpoint extraction.

use thiserror::Error;

/// Result type for OpenAPI operations.
pub type Result<T> = std::result::Result<T, OpenApiError>;

/// Errors that abort extraction of a whole document.
///
/// Everything below the document level (unresolvable references, malformed
/// parameters, odd schemas) degrades to a lower-fidelity descriptor instead.
#[derive(Error, Debug)]
pub enum OpenApiError {
    /// The input text is neither valid JSON nor valid YAML
    #[error("Invalid YAML format: {0}")]
    ParseFailure(String),

    /// The document parsed but its top level is not a mapping
    #[error("Invalid OpenAPI document: {0}")]
    InvalidDocument(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OpenApiError {
    /// True for errors caused by the submitted document rather than the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OpenApiError::ParseFailure(_) | OpenApiError::InvalidDocument(_)
        )
    }
}
