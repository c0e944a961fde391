//! Request and response types for the chain log API.

use serde::{Deserialize, Serialize};


// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

// ============================================================================
// Observations
// ============================================================================

/// Query parameters of an observation request.
///
/// Unset fields are left out of the query string and take the server-side
/// defaults (`0`, or `SPY` for the ticker).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationParams {
    /// Call volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_volume: Option<String>,
    /// Put volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put_volume: Option<String>,
    /// Last price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lst_price: Option<String>,
    /// Ticker symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_ticker: Option<String>,
}

/// A stored value: either the server's numeric default or verbatim text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value.
    Number(i64),
    /// Text value.
    Text(String),
}

/// A record stored in a daily log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Sequence number within the day's log.
    pub id: i64,
    /// UTC instant of the append.
    pub timestamp: String,
    /// Call volume.
    pub call_volume: FieldValue,
    /// Put volume.
    pub put_volume: FieldValue,
    /// Ticker symbol.
    pub selected_ticker: String,
    /// Last price.
    pub lst_price: FieldValue,
}

/// Error body returned with HTTP 500.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"Internal Server Error"`.
    pub error: String,
    /// Failure details.
    pub details: String,
}
