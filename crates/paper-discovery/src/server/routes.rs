//! Route handlers.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::discovery::PaperDiscovery;
use crate::error::DiscoveryError;
use crate::formatters::ExportFormat;
use crate::models::PaperRecord;

/// Search request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    /// Research topic; blank or missing is rejected.
    #[serde(default)]
    pub topic: Option<String>,
}

/// Search response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked papers, best first.
    pub papers: Vec<PaperRecord>,
}

/// Export request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    /// Papers in citation order.
    pub papers: Vec<PaperRecord>,
}

/// JSON error payload: `{ "error": "..." }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<DiscoveryError> for ApiError {
    fn from(err: DiscoveryError) -> Self {
        let status =
            if err.is_client_error() { StatusCode::BAD_REQUEST } else { StatusCode::BAD_GATEWAY };
        Self { status, message: err.to_user_message() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

/// Create the application router.
pub fn create_router(discovery: PaperDiscovery) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/search-papers", post(search_papers))
        .route("/export/ris", post(export_ris))
        .route("/export/bibtex", post(export_bibtex))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(discovery)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "paper-discovery",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn search_papers(
    State(discovery): State<PaperDiscovery>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = body?;
    let topic = request.topic.unwrap_or_default();

    let papers = discovery.discover(&topic).await.map_err(|e| {
        if !e.is_client_error() {
            tracing::error!(error = %e, "Paper search failed");
        }
        ApiError::from(e)
    })?;

    Ok(Json(SearchResponse { papers }))
}

async fn export_ris(body: Result<Json<ExportRequest>, JsonRejection>) -> Result<Response, ApiError> {
    export(ExportFormat::Ris, body)
}

async fn export_bibtex(
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    export(ExportFormat::Bibtex, body)
}

fn export(
    format: ExportFormat,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let rendered = format.render(&request.papers);

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        rendered,
    )
        .into_response())
}
