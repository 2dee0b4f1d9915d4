use serde::Deserialize;
use serde_json::Value;

use crate::error::{PvpcError, Result};
use crate::models::PricePoint;

// ---------------------------------------------------------------------------
// IndicatorResponse — body of GET /indicators/{id}
// ---------------------------------------------------------------------------

/// The live API nests `values` inside `indicator`; older documentation shows
/// it beside `indicator` at the top level. Both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorResponse {
    pub indicator: IndicatorInfo,
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorValue {
    pub value: f64,
    pub datetime: String,
}

impl IndicatorResponse {
    /// Validate a decoded body against the expected indicator/values shape.
    pub fn from_json(body: Value) -> Result<Self> {
        if !body.is_object() {
            return Err(PvpcError::Schema("expected a JSON object".into()));
        }
        match body.get("indicator") {
            Some(Value::Object(_)) => {}
            Some(_) => return Err(PvpcError::Schema("`indicator` is not an object".into())),
            None => return Err(PvpcError::Schema("missing `indicator`".into())),
        }
        serde_json::from_value(body).map_err(|e| PvpcError::Schema(e.to_string()))
    }

    /// Raw value records, preferring the nested list.
    pub fn raw_values(&self) -> Result<&[Value]> {
        self.indicator
            .values
            .as_deref()
            .or(self.values.as_deref())
            .ok_or_else(|| PvpcError::Schema("missing `values`".into()))
    }

    /// Map every value record into a [`PricePoint`], preserving order.
    pub fn into_price_points(self) -> Result<Vec<PricePoint>> {
        self.raw_values()?
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let record: IndicatorValue = serde_json::from_value(raw.clone())
                    .map_err(|e| PvpcError::Schema(format!("values[{i}]: {e}")))?;
                Ok(PricePoint::pvpc(record.datetime, record.value))
            })
            .collect()
    }
}
