//! Request and response models for the REST API.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;


/// Query parameter carrying the call volume.
pub const CALL_VOLUME_PARAM: &str = "callVolume";
/// Query parameter carrying the put volume.
pub const PUT_VOLUME_PARAM: &str = "putVolume";
/// Query parameter carrying the last traded price of the underlying.
pub const LST_PRICE_PARAM: &str = "lstPrice";
/// Query parameter carrying the ticker symbol.
pub const SELECTED_TICKER_PARAM: &str = "selectedTicker";

/// Ticker recorded when the request does not name one.
pub const DEFAULT_TICKER: &str = "SPY";

/// A volume or price value exactly as it was observed.
///
/// Values are never coerced: a query string value is kept as text, and the
/// only number the service produces itself is the `0` default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value.
    Number(i64),
    /// Text value passed through verbatim.
    Text(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Observation fields supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventFields {
    /// Call volume, `0` when absent.
    pub call_volume: FieldValue,
    /// Put volume, `0` when absent.
    pub put_volume: FieldValue,
    /// Ticker symbol, `"SPY"` when absent.
    pub selected_ticker: String,
    /// Last price, `0` when absent.
    pub lst_price: FieldValue,
}

impl Default for EventFields {
    fn default() -> Self {
        Self {
            call_volume: FieldValue::default(),
            put_volume: FieldValue::default(),
            selected_ticker: DEFAULT_TICKER.to_string(),
            lst_price: FieldValue::default(),
        }
    }
}

impl EventFields {
    /// Builds the observation fields from raw query parameters.
    ///
    /// Unknown parameters are ignored. Present values are taken verbatim,
    /// including empty and non-numeric strings.
    #[must_use]
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let value = |name: &str| {
            params
                .get(name)
                .map(|v| FieldValue::from(v.as_str()))
                .unwrap_or_default()
        };

        Self {
            call_volume: value(CALL_VOLUME_PARAM),
            put_volume: value(PUT_VOLUME_PARAM),
            selected_ticker: params
                .get(SELECTED_TICKER_PARAM)
                .cloned()
                .unwrap_or_else(|| DEFAULT_TICKER.to_string()),
            lst_price: value(LST_PRICE_PARAM),
        }
    }
}

/// One persisted entry of a daily log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventRecord {
    /// Sequence number within the day's log.
    pub id: i64,
    /// UTC instant of the append, RFC 3339 with millisecond precision.
    pub timestamp: String,
    /// Caller-supplied observation fields.
    #[serde(flatten)]
    pub fields: EventFields,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
