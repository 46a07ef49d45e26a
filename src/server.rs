// Axum-based HTTP API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::pipeline::{AnalysisContext, AnalysisResult};

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// Error response with a `{ "detail": ... }` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Create the application router. CORS is fully open.
pub fn create_router(ctx: AnalysisContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze/", post(analyze_text))
        .route("/analyze-url/", post(analyze_url))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(ctx)
}

/// Run the web server until the process is stopped.
pub async fn run_server(ctx: AnalysisContext, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(ctx);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("textlens listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// Capability failures here are server errors.
async fn analyze_text(
    State(ctx): State<AnalysisContext>,
    Json(req): Json<TextRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    info!(chars = req.text.chars().count(), "analyzing text");
    ctx.analyze_text(req.text).await.map(Json).map_err(|e| {
        error!("text analysis failed: {}", e);
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: e.to_string(),
        }
    })
}

// Any failure on this endpoint, fetch or analysis, is reported as 400.
async fn analyze_url(
    State(ctx): State<AnalysisContext>,
    Json(req): Json<UrlRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    info!(url = %req.url, "analyzing url");
    ctx.analyze_url(req.url).await.map(Json).map_err(|e| {
        warn!("url analysis failed: {}", e);
        ApiError {
            status: StatusCode::BAD_REQUEST,
            detail: e.to_string(),
        }
    })
}
