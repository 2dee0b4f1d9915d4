use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /
///
/// Describes the API and lists its endpoints.
pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "PVPC API",
        "description": "Hourly PVPC electricity prices from ESIOS indicator 1001",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/": "API information",
            "/health": "Service health",
            "/pvpc/current": "PVPC price for the current hour",
            "/pvpc/today": "All PVPC prices for today",
            "/pvpc/tomorrow": "All PVPC prices for tomorrow, once published",
            "/pvpc/summary": "Daily summary (min, max, average, current)",
            "/.well-known/openai-apps-challenge": "OpenAI apps domain verification"
        }
    }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }))
}

/// GET /.well-known/openai-apps-challenge
///
/// Serves the OpenAI apps verification token as plain text.
pub async fn openai_challenge(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    match tokio::fs::read_to_string(&state.challenge_file).await {
        Ok(token) => Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], token)),
        Err(e) => {
            tracing::warn!(path = %state.challenge_file.display(), error = %e, "verification file unavailable");
            Err(AppError::not_found("Verification file not found"))
        }
    }
}
