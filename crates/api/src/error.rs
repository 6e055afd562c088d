use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use mowwatch_core::AuthenticationError;
use mowwatch_husqvarna::action::UnknownAction;
use mowwatch_husqvarna::HusqvarnaError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses
/// of the form `{ "error": message, "code": CODE }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No access token could be obtained for the device API.
    #[error(transparent)]
    Auth(#[from] AuthenticationError),

    /// The device API call failed.
    #[error(transparent)]
    Upstream(#[from] HusqvarnaError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<UnknownAction> for AppError {
    fn from(err: UnknownAction) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Auth(err) => {
                tracing::error!(error = %err, "Device API authentication failed");
                let status = match err {
                    AuthenticationError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (
                    status,
                    "UPSTREAM_AUTH_FAILED",
                    "Could not authenticate with the device API".to_string(),
                )
            }

            AppError::Upstream(err) => classify_upstream_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a device API error into an HTTP status, error code, and message.
///
/// - Upstream 404 maps to 404 (unknown mower id).
/// - Timeouts map to 504.
/// - Everything else maps to 502; the upstream body is logged, not returned.
fn classify_upstream_error(err: &HusqvarnaError) -> (StatusCode, &'static str, String) {
    match err {
        HusqvarnaError::ApiError { status: 404, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Mower not found".to_string(),
        ),
        HusqvarnaError::ApiError { status, body } => {
            tracing::error!(status, body = %body, "Device API returned an error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("Device API returned HTTP {status}"),
            )
        }
        HusqvarnaError::Request(e) if e.is_timeout() => {
            tracing::error!(error = %e, "Device API timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "Device API timed out".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Device API call failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Device API unavailable".to_string(),
            )
        }
    }
}
