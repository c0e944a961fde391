//! Route configuration.

use crate::api::handlers;
use crate::state::AppState;
use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Creates the API router.
///
/// Every response, errors included, carries permissive CORS headers.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Observations
        .route(
            "/api/v1/observations",
            get(handlers::record_observation).post(handlers::record_observation),
        )
        // Function URL style entry point
        .route(
            "/",
            get(handlers::record_observation).post(handlers::record_observation),
        )
        .with_state(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        ))
}

#[cfg(test)]
mod tests;
