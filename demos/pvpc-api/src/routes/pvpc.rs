use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /pvpc/current
///
/// Price for the current local hour. 404 when the hour is not published.
pub async fn current(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let price = state
        .client
        .current_hour_price()
        .await
        .map_err(|e| AppError::internal("Error fetching the current PVPC price", e))?;

    match price {
        Some(p) => Ok(Json(json!({ "success": true, "data": p }))),
        None => Err(AppError::not_found("No price found for the current hour")),
    }
}

/// GET /pvpc/today
///
/// Every hourly price published for today.
pub async fn today(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let prices = state
        .client
        .fetch_today_prices()
        .await
        .map_err(|e| AppError::internal("Error fetching today's PVPC prices", e))?;

    let count = prices.len();
    Ok(Json(json!({ "success": true, "count": count, "data": prices })))
}

/// GET /pvpc/tomorrow
///
/// Tomorrow's prices, available once the operator publishes them in the
/// evening. Before that `count` is 0.
pub async fn tomorrow(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let prices = state
        .client
        .fetch_tomorrow_prices()
        .await
        .map_err(|e| AppError::internal("Error fetching tomorrow's PVPC prices", e))?;

    let count = prices.len();
    Ok(Json(json!({ "success": true, "count": count, "data": prices })))
}

/// GET /pvpc/summary
///
/// Min, max and average for the day, plus the current-hour price.
pub async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let summary = state
        .client
        .daily_summary()
        .await
        .map_err(|e| AppError::internal("Error fetching the PVPC daily summary", e))?;

    Ok(Json(json!({ "success": true, "data": summary })))
}
