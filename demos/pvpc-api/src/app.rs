use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::meta::index))
        .route("/health", get(routes::meta::health))
        .route(
            "/.well-known/openai-apps-challenge",
            get(routes::meta::openai_challenge),
        )
        .route("/pvpc/current", get(routes::pvpc::current))
        .route("/pvpc/today", get(routes::pvpc::today))
        .route("/pvpc/tomorrow", get(routes::pvpc::tomorrow))
        .route("/pvpc/summary", get(routes::pvpc::summary))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
