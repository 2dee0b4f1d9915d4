use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::clock::{Clock, SystemClock};
use crate::config::{normalize_api_key, ClientConfig, SummaryFetch};
use crate::error::{PvpcError, Result};
use crate::models::{DailySummary, IndicatorResponse, PricePoint};
use crate::source::{EsiosSource, IndicatorQuery, IndicatorSource};
use crate::summary;

// ---------------------------------------------------------------------------
// PvpcClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PvpcClient`].
///
/// Use [`PvpcClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PvpcClientBuilder::build).
#[derive(Default)]
pub struct PvpcClientBuilder {
    config: ClientConfig,
    source: Option<Arc<dyn IndicatorSource>>,
    clock: Option<Arc<dyn Clock>>,
}

impl PvpcClientBuilder {
    /// Start from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the ESIOS API key. Blank keys are ignored.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = normalize_api_key(key.into());
        self
    }

    /// Override the upstream base URL. Defaults to the public ESIOS host.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set an overall request timeout.
    ///
    /// By default no timeout is set beyond what the transport applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Choose how the summary obtains its current-hour price.
    pub fn summary_fetch(mut self, mode: SummaryFetch) -> Self {
        self.config.summary_fetch = mode;
        self
    }

    /// Replace the HTTP transport. When set, `api_key`, `base_url` and
    /// `timeout` have no effect.
    pub fn source(mut self, source: Arc<dyn IndicatorSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the local clock used for the current-hour lookup.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<PvpcClient> {
        let source = match self.source {
            Some(source) => source,
            None => Arc::new(EsiosSource::new(
                &self.config.base_url,
                self.config.api_key.clone(),
                self.config.timeout,
            )?),
        };
        Ok(PvpcClient {
            source,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            config: self.config,
        })
    }
}

// ---------------------------------------------------------------------------
// PvpcClient
// ---------------------------------------------------------------------------

/// Fetches, validates and aggregates PVPC prices.
///
/// Holds no mutable state: every call performs its own upstream fetch, with
/// no caching and no retry. Cloning is cheap and clones share the transport.
#[derive(Clone)]
pub struct PvpcClient {
    source: Arc<dyn IndicatorSource>,
    clock: Arc<dyn Clock>,
    config: ClientConfig,
}

impl PvpcClient {
    pub fn builder() -> PvpcClientBuilder {
        PvpcClientBuilder::default()
    }

    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Local calendar date according to the client's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// All prices published for today's local calendar day.
    pub async fn fetch_today_prices(&self) -> Result<Vec<PricePoint>> {
        self.fetch_prices_for(self.today()).await
    }

    /// All prices published for tomorrow. The operator publishes these in
    /// the evening, so before then the list is usually empty.
    pub async fn fetch_tomorrow_prices(&self) -> Result<Vec<PricePoint>> {
        let tomorrow = self.today().succ_opt().unwrap_or(NaiveDate::MAX);
        self.fetch_prices_for(tomorrow).await
    }

    /// All prices published for `date`, in upstream order.
    pub async fn fetch_prices_for(&self, date: NaiveDate) -> Result<Vec<PricePoint>> {
        let result = self.fetch_and_normalize(&IndicatorQuery::for_day(date)).await;

        match &result {
            Ok(points) => tracing::debug!(%date, count = points.len(), "fetched PVPC prices"),
            Err(e) => tracing::error!(%date, kind = e.kind(), error = %e, "error fetching PVPC data"),
        }
        result
    }

    async fn fetch_and_normalize(&self, query: &IndicatorQuery) -> Result<Vec<PricePoint>> {
        let body = self.source.fetch(query).await?;
        IndicatorResponse::from_json(body)?.into_price_points()
    }

    /// Price for the current local hour, if published.
    pub async fn current_hour_price(&self) -> Result<Option<PricePoint>> {
        let points = self.fetch_today_prices().await?;
        Ok(summary::find_current_hour(&points, self.clock.as_ref()).cloned())
    }

    /// Min, max and average over today's prices plus the current-hour price.
    ///
    /// With [`SummaryFetch::Independent`] (the default) the current-hour
    /// price comes from a second fetch.
    pub async fn daily_summary(&self) -> Result<DailySummary> {
        let points = self.fetch_today_prices().await?;
        if points.is_empty() {
            let err = PvpcError::EmptyData;
            tracing::error!(kind = err.kind(), "no PVPC data available for summary");
            return Err(err);
        }

        let current = match self.config.summary_fetch {
            SummaryFetch::Independent => self.current_hour_price().await?,
            SummaryFetch::Shared => summary::find_current_hour(&points, self.clock.as_ref()).cloned(),
        };

        summary::summarize(&points, current.map(|p| p.value))
    }
}

impl fmt::Debug for PvpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PvpcClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
