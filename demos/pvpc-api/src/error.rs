use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Route error rendered as JSON.
///
/// Failures carry a route-specific description plus the underlying message
/// and render as `{"success": false, "error": ..., "message": ...}`. Expected
/// empty results render as a bare `{"error": ...}`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: msg.into(),
            message: None,
        }
    }

    /// Wrap an SDK failure. Every SDK error kind is a 500 here.
    pub fn internal(context: impl Into<String>, err: pvpc_sdk::PvpcError) -> Self {
        let error = context.into();
        tracing::error!(context = %error, kind = err.kind(), error = %err, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
            message: Some(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self.message {
            Some(message) => json!({
                "success": false,
                "error": self.error,
                "message": message,
            }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}
