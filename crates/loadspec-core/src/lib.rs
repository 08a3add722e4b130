//! Shared configuration and error types for loadspec.

pub mod config;
pub mod error;

// Re-exports
pub use config::{LoadspecConfig, ObservabilityConfig, ServerConfig};
pub use error::{Error, Result};
