use mowwatch_core::{AuthenticationError, FetchError};

/// Errors from the Husqvarna HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum HusqvarnaError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Husqvarna API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not the JSON document we expected.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<HusqvarnaError> for AuthenticationError {
    fn from(err: HusqvarnaError) -> Self {
        match err {
            HusqvarnaError::Request(e) => AuthenticationError::Transport(e.to_string()),
            HusqvarnaError::ApiError { status, body } => {
                AuthenticationError::Rejected { status, body }
            }
            HusqvarnaError::Decode(e) => AuthenticationError::Malformed(e.to_string()),
        }
    }
}

impl From<HusqvarnaError> for FetchError {
    fn from(err: HusqvarnaError) -> Self {
        match err {
            HusqvarnaError::Request(e) => FetchError::Transport(e.to_string()),
            HusqvarnaError::ApiError { status, body } => FetchError::HttpStatus { status, body },
            HusqvarnaError::Decode(e) => FetchError::Malformed(e.to_string()),
        }
    }
}
