use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Bad Gateway", "Service Unavailable")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

/// Error taxonomy for the ingest pipeline and its HTTP surface.
///
/// Only the fetch layer produces `TransportError`/`FormatError`; the
/// normalizer and aggregators substitute defaults instead of failing. A
/// well-formed response with zero rows is a success, never an error.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The remote call did not complete successfully (network failure or
    /// non-success status).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The response body did not match the expected envelope, or the
    /// embedded payload failed to decode.
    #[error("Invalid response format: {0}")]
    FormatError(String),

    /// No snapshot has been produced yet.
    #[error("Data not ready: {0}")]
    NotReady(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::TransportError(_) | ServiceError::FormatError(_) => {
                StatusCode::BAD_GATEWAY
            }
            ServiceError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn response_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.response_message();

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: error_message,
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::TransportError(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::FormatError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_map_to_bad_gateway() {
        assert_eq!(
            ServiceError::TransportError("status 500".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ServiceError::FormatError("no marker".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn not_ready_maps_to_service_unavailable() {
        assert_eq!(
            ServiceError::NotReady("first load pending".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
