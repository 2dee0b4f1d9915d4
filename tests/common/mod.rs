//! Shared test fixtures for the PVPC SDK integration tests.
//!
//! Provides a counting [`StubSource`] for exercising the client without a
//! network, a frozen clock, and `spawn_upstream()` which serves an Axum
//! router on an ephemeral local port to stand in for the ESIOS API.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use pvpc_sdk::{FixedClock, IndicatorQuery, IndicatorSource, PvpcClient, PvpcError, Result};
use serde_json::{json, Value};

/// Local test date: 2026-10-17, +02:00 (CEST).
pub const TEST_OFFSET_SECS: i32 = 2 * 3600;

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

pub fn at_hour(hour: u32) -> NaiveDateTime {
    test_date().and_hms_opt(hour, 10, 0).unwrap()
}

pub fn clock_at(hour: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::at(at_hour(hour), TEST_OFFSET_SECS).unwrap())
}

/// ESIOS-style body with `values` nested under `indicator`.
pub fn indicator_body(values: &[(f64, &str)]) -> Value {
    let values: Vec<Value> = values
        .iter()
        .map(|(value, datetime)| {
            json!({
                "value": value,
                "datetime": datetime,
                "datetime_utc": datetime,
                "geo_id": 8741,
                "geo_name": "Península"
            })
        })
        .collect();
    json!({
        "indicator": {
            "name": "Término de facturación de energía activa del PVPC 2.0TD",
            "short_name": "PVPC T. 2.0TD",
            "id": 1001,
            "values": values
        }
    })
}

pub enum StubReply {
    Body(Value),
    Remote(u16, &'static str),
}

/// In-memory [`IndicatorSource`] that records every query it receives.
pub struct StubSource {
    reply: StubReply,
    calls: AtomicUsize,
    queries: Mutex<Vec<IndicatorQuery>>,
}

impl StubSource {
    pub fn body(body: Value) -> Arc<Self> {
        Arc::new(Self::new(StubReply::Body(body)))
    }

    pub fn remote(status: u16, text: &'static str) -> Arc<Self> {
        Arc::new(Self::new(StubReply::Remote(status, text)))
    }

    fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<IndicatorQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndicatorSource for StubSource {
    async fn fetch(&self, query: &IndicatorQuery) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        match &self.reply {
            StubReply::Body(body) => Ok(body.clone()),
            StubReply::Remote(status, text) => Err(PvpcError::Remote {
                status: *status,
                status_text: text.to_string(),
            }),
        }
    }
}

/// Client wired to `source`, with the clock frozen at `hour` on the test date.
pub fn client_with(source: Arc<StubSource>, hour: u32) -> PvpcClient {
    PvpcClient::builder()
        .source(source)
        .clock(clock_at(hour))
        .build()
        .unwrap()
}

/// Serve `router` on 127.0.0.1 with an OS-assigned port; returns its base URL.
pub async fn spawn_upstream(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
