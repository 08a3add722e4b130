use crate::types::*;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Json, Multipart, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use loadspec_core::ServerConfig;
use loadspec_openapi::{OpenApiError, parse_document};
use loadspec_telemetry::{extraction_span, record_extraction_outcome};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Multipart field carrying the document.
const UPLOAD_FIELD: &str = "file";

pub fn create_router(config: &ServerConfig) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health_check))
        .route("/readiness", get(readiness_check))
        // API endpoints
        .route("/upload", post(upload_document))
        // Middleware layers (applied in reverse order)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
}

/// Bind to `config.bind_address()` and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Health check endpoint - returns OK if the service is running
async fn health_check() -> impl IntoResponse {
    tracing::debug!("Health check requested");
    (StatusCode::OK, "OK")
}

/// Readiness check endpoint; extraction has no external dependencies
async fn readiness_check() -> impl IntoResponse {
    tracing::debug!("Readiness check requested");
    (StatusCode::OK, "READY")
}

async fn upload_document(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::bad_request("Uploaded file is not valid UTF-8"))?;

        let span = extraction_span(&file_name, text.len());
        let result = span.in_scope(|| parse_document(&text));
        record_extraction_outcome(&span, result.as_ref().map(Vec::len));

        let endpoints = result?;
        return Ok(Json(UploadResponse { endpoints }));
    }

    Err(AppError::bad_request(format!(
        "Missing '{}' field in upload",
        UPLOAD_FIELD
    )))
}

// Error handling
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<OpenApiError> for AppError {
    fn from(err: OpenApiError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        AppError::new(status, err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::new(err.status(), err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self.message);
        } else {
            tracing::warn!("Rejected request: {}", self.message);
        }
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
