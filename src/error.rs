//! Error types for the relay
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::fetch::Source;

// == Relay Error Enum ==
/// Unified error type for the relay.
///
/// Cloneable so one refresh outcome can be handed to every request waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// One of the core upstream fetches failed
    #[error("Upstream {upstream} unavailable ({url}): {detail}")]
    UpstreamUnavailable {
        upstream: Source,
        url: String,
        detail: String,
    },

    /// A refresh failed recently and the backoff window has not elapsed
    #[error("Upstream failed recently, waiting for backoff to expire")]
    RecentFailureBackoff,

    /// The assembled document could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body text of every failed response; details stay in the logs.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

// == IntoResponse Implementation ==
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": GENERIC_ERROR_MESSAGE
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the relay.
pub type Result<T> = std::result::Result<T, RelayError>;
