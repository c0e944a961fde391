//! Error types for the daily log and the REST API.

use crate::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;


/// Fixed `error` value of every failure response.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"Internal Server Error"`.
    pub error: String,
    /// Message of the underlying failure.
    pub details: String,
}

/// Failure of a single append to a daily log.
///
/// No step is retried, so either kind aborts the whole append.
#[derive(Debug, thiserror::Error)]
pub enum AppendError {
    /// The object store failed for a reason other than a missing object.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The stored log could not be decoded as a JSON array.
    #[error("Data format error in {key}: {reason}")]
    DataFormat {
        /// Object key of the log.
        key: String,
        /// What was wrong with the content.
        reason: String,
    },
}

impl AppendError {
    /// Returns the error kind name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AppendError::Storage(_) => "StorageError",
            AppendError::DataFormat { .. } => "DataFormatError",
        }
    }

    pub(crate) fn data_format(key: &str, reason: impl std::fmt::Display) -> Self {
        AppendError::DataFormat {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Append to the daily log failed.
    #[error(transparent)]
    Append(#[from] AppendError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: INTERNAL_SERVER_ERROR.to_string(),
            details: self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
