use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::pipeline::{BriefingResponse, GenerateBriefingRequest};
use crate::state::AppState;
use crate::types::{BriefingError, Result};

pub const SERVICE_NAME: &str = "RSS to Audio News Briefing API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub murf_api_configured: bool,
    pub ffmpeg_available: bool,
    pub background_music_exists: bool,
}

pub fn create_app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/generate-briefing", post(generate_briefing))
        .route("/info", get(info))
        .route("/health", get(health))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

async fn generate_briefing(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<GenerateBriefingRequest>, JsonRejection>,
) -> Result<Json<BriefingResponse>> {
    let Json(request) = payload.map_err(|rejection| BriefingError::BadRequest(rejection.body_text()))?;
    let response = state.pipeline.generate(&request).await?;
    Ok(Json(response))
}

async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = state.config();
    Json(HealthResponse {
        status: "healthy".to_string(),
        murf_api_configured: config.murf_api_key_configured(),
        ffmpeg_available: state.pipeline.mixer().ffmpeg_available(),
        background_music_exists: config.background_music_exists(),
    })
}

impl BriefingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BriefingError::BadRequest(_) | BriefingError::NoContent(_) => StatusCode::BAD_REQUEST,
            BriefingError::Synthesis(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BriefingError {
    fn into_response(self) -> Response {
        let error = self.surfaced();
        let body = ErrorResponse {
            success: false,
            error: error.kind().to_string(),
            details: Some(error.to_string()),
        };
        (error.status_code(), Json(body)).into_response()
    }
}
