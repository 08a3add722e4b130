//! HTTP ingestion boundary for loadspec
//!
//! Accepts OpenAPI documents as multipart uploads and answers with the
//! extracted endpoint descriptors. Nothing is kept between requests.

pub mod rest;
pub mod types;

pub use rest::{AppError, create_router, serve};
pub use types::*;
