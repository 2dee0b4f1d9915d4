//! Upstream transport for indicator data.
//!
//! [`IndicatorSource`] is the one seam between the client and the network.
//! A source performs the request and the status check and hands back the
//! decoded JSON body; validating its shape is the client's job.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;

use crate::config::{API_KEY_HEADER, PVPC_INDICATOR_ID};
use crate::error::{PvpcError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single-day query against one indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorQuery {
    pub indicator_id: u32,
    /// `YYYY-MM-DDT00:00`
    pub start_date: String,
    /// `YYYY-MM-DDT23:59`
    pub end_date: String,
}

impl IndicatorQuery {
    /// Query covering the whole local calendar day `date`.
    pub fn for_day(date: NaiveDate) -> Self {
        let day = date.format(DATE_FORMAT).to_string();
        Self {
            indicator_id: PVPC_INDICATOR_ID,
            start_date: format!("{day}T00:00"),
            end_date: format!("{day}T23:59"),
        }
    }
}

#[async_trait]
pub trait IndicatorSource: Send + Sync {
    async fn fetch(&self, query: &IndicatorQuery) -> Result<Value>;
}

// ---------------------------------------------------------------------------
// EsiosSource
// ---------------------------------------------------------------------------

/// Fetches indicators from the ESIOS REST API over `reqwest`.
#[derive(Clone)]
pub struct EsiosSource {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl EsiosSource {
    /// Create a source for `base_url`.
    ///
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: builder.build()?,
        })
    }

    pub fn url_for(&self, query: &IndicatorQuery) -> String {
        format!("{}/indicators/{}", self.base_url, query.indicator_id)
    }
}

#[async_trait]
impl IndicatorSource for EsiosSource {
    async fn fetch(&self, query: &IndicatorQuery) -> Result<Value> {
        let url = self.url_for(query);

        let mut req = self
            .client
            .get(&url)
            .query(&[
                ("start_date", query.start_date.as_str()),
                ("end_date", query.end_date.as_str()),
            ])
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        tracing::debug!(%url, start = %query.start_date, end = %query.end_date, "fetching indicator");
        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(PvpcError::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| PvpcError::Schema(format!("response body is not valid JSON: {e}")))
    }
}
