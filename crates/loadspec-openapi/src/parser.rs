//! OpenAPI endpoint extraction.
//!
//! This module walks `paths` of a parsed document, dereferences path items,
//! parameters and request bodies, and emits one [`EndpointDescriptor`] per
//! supported (path, method) pair.

use crate::document::Document;
use crate::error::{OpenApiError, Result};
use crate::sample::{declared_type, first_example, synthesize};
use crate::types::{EndpointDescriptor, HttpMethod, ParameterDescriptor, ParameterLocation};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Content types tried, in order, before falling back to the first declared one.
const PREFERRED_CONTENT_TYPES: [&str; 2] = ["application/json", "multipart/form-data"];

/// Parser for OpenAPI documents.
#[derive(Debug, Clone)]
pub struct OpenApiParser {
    document: Document,
}

impl OpenApiParser {
    /// Load and parse an OpenAPI document from a file.
    ///
    /// Supports both JSON and YAML formats.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse an OpenAPI document from a string.
    ///
    /// Automatically detects JSON or YAML format.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Self::from_document(Document::parse(content)?)
    }

    /// Wrap a parsed document, rejecting anything whose root is not a mapping.
    pub fn from_document(document: Document) -> Result<Self> {
        ensure_mapping(&document)?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Extract all endpoints, in path declaration order and then method order.
    pub fn parse(&self) -> Vec<EndpointDescriptor> {
        Extractor::new(&self.document).run()
    }
}

/// Extract endpoints from an already-parsed document.
///
/// Fails only when the document root is not a mapping.
pub fn extract(document: &Document) -> Result<Vec<EndpointDescriptor>> {
    ensure_mapping(document)?;
    Ok(Extractor::new(document).run())
}

fn ensure_mapping(document: &Document) -> Result<()> {
    if document.root().is_object() {
        Ok(())
    } else {
        Err(OpenApiError::InvalidDocument(
            "OpenAPI spec must be a dictionary".to_string(),
        ))
    }
}

/// Single extraction pass over a borrowed document.
struct Extractor<'a> {
    document: &'a Document,
}

impl<'a> Extractor<'a> {
    fn new(document: &'a Document) -> Self {
        Self { document }
    }

    fn run(&self) -> Vec<EndpointDescriptor> {
        let mut endpoints = Vec::new();

        let paths = match self.document.root().get("paths") {
            Some(Value::Object(paths)) => paths,
            _ => {
                warn!("No 'paths' object found in spec or it's not a dictionary");
                return endpoints;
            }
        };

        for (path, path_item) in paths {
            // A path item can be a reference itself
            let path_item = self.resolve(path_item);
            let Value::Object(path_item) = path_item else {
                debug!("Skipping path {}: not a mapping", path);
                continue;
            };

            let global_params = parameter_list(&path_item);

            for method in HttpMethod::ALL {
                let operation = match path_item.get(method.operation_key()) {
                    Some(Value::Object(operation)) if !operation.is_empty() => operation,
                    _ => continue,
                };

                let parameters: Vec<ParameterDescriptor> = global_params
                    .iter()
                    .chain(parameter_list(operation))
                    .filter_map(|param| self.parse_parameter(param))
                    .collect();

                let request_body = self.request_body_sample(operation);

                debug!(
                    "Parsed {} {} ({} parameters, body: {})",
                    method,
                    path,
                    parameters.len(),
                    request_body.is_some()
                );

                endpoints.push(EndpointDescriptor {
                    path: path.clone(),
                    method,
                    summary: operation_summary(operation),
                    parameters,
                    request_body,
                });
            }
        }

        info!("Successfully parsed {} endpoints", endpoints.len());
        endpoints
    }

    fn resolve(&self, node: &Value) -> Value {
        let resolution = self.document.resolve(node);
        if !resolution.is_complete() {
            debug!(
                "{} reference(s) left unresolved: {:?}",
                resolution.unresolved.len(),
                resolution.unresolved
            );
        }
        resolution.into_value()
    }

    fn parse_parameter(&self, raw: &Value) -> Option<ParameterDescriptor> {
        let Value::Object(param) = self.resolve(raw) else {
            return None;
        };

        let name = param.get("name").and_then(parameter_name)?;

        let location = param
            .get("in")
            .and_then(Value::as_str)
            .map(ParameterLocation::from)
            .unwrap_or(ParameterLocation::Query);

        let schema = match param.get("schema") {
            Some(schema) => self.resolve(schema),
            None => Value::Object(Map::new()),
        };
        let schema_type = match &schema {
            Value::Object(schema) => declared_type(schema).unwrap_or("string").to_string(),
            _ => "string".to_string(),
        };

        let example = non_null(param.get("example"))
            .or_else(|| non_null(schema.get("example")))
            .cloned();

        Some(ParameterDescriptor {
            name,
            location,
            required: param.get("required").is_some_and(is_truthy_flag),
            schema_type,
            description: param
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            example,
        })
    }

    fn request_body_sample(&self, operation: &Map<String, Value>) -> Option<Value> {
        let request_body = self.resolve(operation.get("requestBody")?);
        let Some(Value::Object(content)) = request_body.get("content") else {
            return None;
        };
        let media = select_media_type(content)?;

        // An example at the content level wins over the schema
        if let Some(example) = non_null(media.get("example")) {
            return Some(example.clone());
        }
        if let Some(example) = media
            .get("examples")
            .and_then(first_example)
            .filter(|example| !example.is_null())
        {
            return Some(example);
        }

        let schema = self.resolve(media.get("schema")?);
        Some(synthesize(&schema, 0)).filter(|sample| !sample.is_null())
    }
}

/// `parameters` of a path item or operation; anything but a sequence is empty.
fn parameter_list(owner: &Map<String, Value>) -> &[Value] {
    match owner.get("parameters") {
        Some(Value::Array(params)) => params,
        _ => &[],
    }
}

/// Names must be non-empty; numeric names are stringified.
fn parameter_name(name: &Value) -> Option<String> {
    match name {
        Value::String(name) if !name.is_empty() => Some(name.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn select_media_type(content: &Map<String, Value>) -> Option<&Map<String, Value>> {
    PREFERRED_CONTENT_TYPES
        .iter()
        .find_map(|content_type| match content.get(*content_type) {
            Some(Value::Object(media)) if !media.is_empty() => Some(media),
            _ => None,
        })
        .or_else(|| content.values().next().and_then(Value::as_object))
}

fn operation_summary(operation: &Map<String, Value>) -> String {
    ["summary", "description"]
        .iter()
        .filter_map(|key| operation.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// A boolean flag, also accepting the YAML 1.1 spellings (`yes`, `on`, ...)
/// that a YAML 1.2 loader hands over as plain strings.
fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(
            s.as_str(),
            "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE"
        ),
        _ => false,
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}
