//! Pure derivations over a day of [`PricePoint`]s: the current-hour lookup
//! and the min / max / average summary.

use chrono::{DateTime, NaiveDateTime, Timelike};

use crate::clock::Clock;
use crate::config::PRICE_UNITS;
use crate::error::{PvpcError, Result};
use crate::models::{DailySummary, PricePoint};

/// Formats accepted for timestamps that carry no UTC offset. These are read
/// as local wall time.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse an upstream timestamp into local wall time.
///
/// Offset-bearing timestamps (RFC 3339) are converted through `clock`.
/// Returns `None` for anything unparseable.
pub fn parse_local_timestamp(raw: &str, clock: &dyn Clock) -> Option<NaiveDateTime> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(clock.to_local(instant));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// First point, in insertion order, whose timestamp falls on the clock's
/// current local date and hour. Exact-hour match only.
pub fn find_current_hour<'a>(points: &'a [PricePoint], clock: &dyn Clock) -> Option<&'a PricePoint> {
    let now = clock.now();
    points.iter().find(|point| {
        parse_local_timestamp(&point.timestamp, clock)
            .map(|ts| ts.date() == now.date() && ts.hour() == now.hour())
            .unwrap_or(false)
    })
}

/// Round half-up (toward positive infinity on ties) to `decimals` places.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor + 0.5).floor() / factor
}

/// Aggregate a non-empty day of prices.
///
/// The average is rounded half-up to two decimals and then kept within
/// `[min, max]`, so sub-cent data never reports an average outside its range.
pub fn summarize(points: &[PricePoint], current: Option<f64>) -> Result<DailySummary> {
    if points.is_empty() {
        return Err(PvpcError::EmptyData);
    }

    let (min, max, sum) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), p| (min.min(p.value), max.max(p.value), sum + p.value),
    );
    let average = sum / points.len() as f64;

    Ok(DailySummary {
        min,
        max,
        average: round_half_up(average, 2).clamp(min, max),
        current,
        unit: PRICE_UNITS.to_string(),
    })
}
