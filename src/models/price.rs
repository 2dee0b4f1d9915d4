use serde::{Deserialize, Serialize};

use crate::config::{INDICATOR_NAME, PRICE_UNITS};

// ---------------------------------------------------------------------------
// PricePoint — One hourly PVPC price, as published upstream
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub indicator: String,
    pub timestamp: String,
    pub value: f64,
    pub units: String,
}

impl PricePoint {
    /// Wrap a raw upstream record. Value and datetime are kept verbatim.
    pub fn pvpc(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            indicator: INDICATOR_NAME.to_string(),
            timestamp: timestamp.into(),
            value,
            units: PRICE_UNITS.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// DailySummary — Aggregates over one day of prices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub min: f64,
    pub max: f64,
    /// Arithmetic mean, rounded half-up to two decimals.
    pub average: f64,
    /// Price for the caller's current local hour, `null` when not published.
    pub current: Option<f64>,
    pub unit: String,
}
