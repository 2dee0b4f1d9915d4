//! HTTP transport tests against an in-process stand-in for the ESIOS API.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use pvpc_sdk::{EsiosSource, IndicatorQuery, IndicatorSource, PvpcClient, PvpcError};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
struct Seen {
    indicator: String,
    params: HashMap<String, String>,
    headers: HashMap<String, String>,
}

/// Upstream that echoes a fixed two-value body and records each request.
fn recording_upstream(seen: Arc<Mutex<Vec<Seen>>>) -> Router {
    Router::new().route(
        "/indicators/{id}",
        get(
            move |Path(id): Path<String>,
                  Query(params): Query<HashMap<String, String>>,
                  headers: HeaderMap| {
                let seen = seen.clone();
                async move {
                    let headers: HashMap<String, String> = headers
                        .iter()
                        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
                        .collect();
                    seen.lock().unwrap().push(Seen {
                        indicator: id,
                        params,
                        headers,
                    });
                    Json(common::indicator_body(&[
                        (120.5, "2026-10-17T14:00:00.000+02:00"),
                        (90.0, "2026-10-17T15:00:00.000+02:00"),
                    ]))
                }
            },
        ),
    )
}

fn day_query() -> IndicatorQuery {
    IndicatorQuery::for_day(common::test_date())
}

#[tokio::test]
async fn sends_date_range_and_json_headers() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = common::spawn_upstream(recording_upstream(seen.clone())).await;
    let source = EsiosSource::new(&base, None, None).unwrap();

    let body = source.fetch(&day_query()).await.unwrap();
    assert!(body["indicator"]["values"].is_array());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let req = &seen[0];
    assert_eq!(req.indicator, "1001");
    assert_eq!(req.params["start_date"], "2026-10-17T00:00");
    assert_eq!(req.params["end_date"], "2026-10-17T23:59");
    assert_eq!(req.headers["accept"], "application/json");
    assert_eq!(req.headers["content-type"], "application/json");
    assert!(!req.headers.contains_key("x-api-key"));
}

#[tokio::test]
async fn sends_api_key_when_configured() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = common::spawn_upstream(recording_upstream(seen.clone())).await;
    let client = PvpcClient::builder()
        .base_url(base)
        .api_key("token-123")
        .clock(common::clock_at(14))
        .build()
        .unwrap();

    let points = client.fetch_today_prices().await.unwrap();
    assert_eq!(points.len(), 2);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].headers["x-api-key"], "token-123");
}

#[tokio::test]
async fn blank_api_key_is_not_sent() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = common::spawn_upstream(recording_upstream(seen.clone())).await;
    let client = PvpcClient::builder()
        .base_url(base)
        .api_key("")
        .clock(common::clock_at(14))
        .build()
        .unwrap();

    client.fetch_today_prices().await.unwrap();
    assert!(!seen.lock().unwrap()[0].headers.contains_key("x-api-key"));
}

#[tokio::test]
async fn end_to_end_summary_over_http() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let base = common::spawn_upstream(recording_upstream(seen.clone())).await;
    let client = PvpcClient::builder()
        .base_url(base)
        .clock(common::clock_at(14))
        .build()
        .unwrap();

    let summary = client.daily_summary().await.unwrap();
    assert_eq!(summary.min, 90.0);
    assert_eq!(summary.max, 120.5);
    assert_eq!(summary.average, 105.25);
    assert_eq!(summary.current, Some(120.5));
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn non_success_status_is_remote_error() {
    let router = Router::new().route(
        "/indicators/{id}",
        get(|| async { (StatusCode::FORBIDDEN, "denied") }),
    );
    let base = common::spawn_upstream(router).await;
    let source = EsiosSource::new(&base, None, None).unwrap();

    let err = source.fetch(&day_query()).await.unwrap_err();
    match &err {
        PvpcError::Remote { status, status_text } => {
            assert_eq!(*status, 403);
            assert_eq!(status_text, "Forbidden");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Error fetching ESIOS data: Forbidden");
}

#[tokio::test]
async fn non_json_body_is_schema_error() {
    let router = Router::new().route("/indicators/{id}", get(|| async { "<html>maintenance</html>" }));
    let base = common::spawn_upstream(router).await;
    let source = EsiosSource::new(&base, None, None).unwrap();

    let err = source.fetch(&day_query()).await.unwrap_err();
    assert!(matches!(err, PvpcError::Schema(_)), "got {err:?}");
}

#[tokio::test]
async fn body_without_values_is_schema_error_through_client() {
    let router = Router::new().route(
        "/indicators/{id}",
        get(|| async { Json(serde_json::json!({"indicator": {"name": "PVPC"}})) }),
    );
    let base = common::spawn_upstream(router).await;
    let client = PvpcClient::builder()
        .base_url(base)
        .clock(common::clock_at(14))
        .build()
        .unwrap();

    let err = client.fetch_today_prices().await.unwrap_err();
    assert!(matches!(err, PvpcError::Schema(_)), "got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = EsiosSource::new(&format!("http://{addr}"), None, None).unwrap();
    let err = source.fetch(&day_query()).await.unwrap_err();
    assert!(matches!(err, PvpcError::Network(_)), "got {err:?}");
    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn configured_timeout_surfaces_as_network_error() {
    let router = Router::new().route(
        "/indicators/{id}",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(Value::Null)
        }),
    );
    let base = common::spawn_upstream(router).await;
    let source = EsiosSource::new(&base, None, Some(Duration::from_millis(100))).unwrap();

    let err = source.fetch(&day_query()).await.unwrap_err();
    match err {
        PvpcError::Network(e) => assert!(e.is_timeout()),
        other => panic!("expected network timeout, got {other:?}"),
    }
}
