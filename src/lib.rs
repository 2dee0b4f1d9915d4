//! PVPC SDK for Rust.
//!
//! Fetches Spain's regulated hourly electricity price (PVPC, ESIOS indicator
//! 1001) for the current day, normalizes each record into a [`PricePoint`],
//! and derives the current-hour price and a [`DailySummary`].
//!
//! # Quick start
//!
//! ```no_run
//! use pvpc_sdk::PvpcClient;
//!
//! # async fn example() -> pvpc_sdk::Result<()> {
//! let client = PvpcClient::builder().api_key("my-esios-token").build()?;
//!
//! let today = client.fetch_today_prices().await?;
//! let now = client.current_hour_price().await?;
//! let summary = client.daily_summary().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod summary;

pub use client::{PvpcClient, PvpcClientBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ClientConfig, SummaryFetch};
pub use error::{PvpcError, Result};
pub use models::{DailySummary, PricePoint};
pub use source::{EsiosSource, IndicatorQuery, IndicatorSource};
