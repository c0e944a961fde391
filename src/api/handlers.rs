//! API request handlers.

use crate::error::{ApiError, ErrorResponse};
use crate::models::{EventFields, EventRecord, HealthResponse};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Observations
// ============================================================================

/// Record an option-chain observation in today's log.
///
/// Query values are stored verbatim; absent volumes and price default to `0`
/// and an absent ticker to `SPY`.
#[utoipa::path(
    post,
    path = "/api/v1/observations",
    params(
        ("callVolume" = Option<String>, Query, description = "Call volume"),
        ("putVolume" = Option<String>, Query, description = "Put volume"),
        ("lstPrice" = Option<String>, Query, description = "Last price"),
        ("selectedTicker" = Option<String>, Query, description = "Ticker symbol, SPY when absent")
    ),
    responses(
        (status = 200, description = "Record appended", body = EventRecord),
        (status = 500, description = "Storage or data format failure", body = ErrorResponse)
    ),
    tag = "Observations"
)]
pub async fn record_observation(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<EventRecord>, ApiError> {
    let fields = EventFields::from_query(&params);
    debug!(
        ticker = %fields.selected_ticker,
        call_volume = %fields.call_volume,
        put_volume = %fields.put_volume,
        lst_price = %fields.lst_price,
        "Recording observation"
    );

    match state.appender.append(fields).await {
        Ok(record) => Ok(Json(record)),
        Err(e) => {
            error!(kind = e.kind(), "Append failed: {}", e);
            Err(e.into())
        }
    }
}
