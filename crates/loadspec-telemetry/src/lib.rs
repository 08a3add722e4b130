//! # loadspec Telemetry
//!
//! Structured logging and OpenTelemetry tracing for the loadspec binaries.
//!
//! Library crates only emit `tracing` events; this crate installs the
//! subscriber that formats them and bridges spans into OpenTelemetry.

mod spans;
mod tracer;

pub use spans::{extraction_span, record_extraction_outcome};
pub use tracer::{init_telemetry, tracer_provider};

/// Span attribute names used by loadspec.
pub mod attributes {
    pub const LOADSPEC_SOURCE: &str = "loadspec.source";
    pub const LOADSPEC_DOCUMENT_BYTES: &str = "loadspec.document.bytes";
    pub const LOADSPEC_ENDPOINT_COUNT: &str = "loadspec.endpoint.count";
    pub const LOADSPEC_ERROR: &str = "loadspec.error";

    // Instrumentation scope name
    pub const SYSTEM_NAME: &str = "loadspec";
}
