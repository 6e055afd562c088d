use std::time::Duration;

/// The identity endpoint could not issue an access token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Identity endpoint unreachable: {0}")]
    Transport(String),

    #[error("Identity endpoint rejected credentials (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Malformed token response: {0}")]
    Malformed(String),

    #[error("Identity endpoint timed out after {0:?}")]
    Timeout(Duration),
}

/// The device status could not be fetched for this tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Device API unreachable: {0}")]
    Transport(String),

    #[error("Device API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed device response: {0}")]
    Malformed(String),

    #[error("Device API returned no devices")]
    NoDevices,

    #[error("Device API timed out after {0:?}")]
    Timeout(Duration),
}

/// The notification channel did not accept a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification channel unreachable: {0}")]
    Transport(String),

    #[error("Notification channel returned HTTP {0}")]
    HttpStatus(u16),
}

/// Reasons a poll tick was aborted before anything was recorded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    #[error(transparent)]
    Auth(#[from] AuthenticationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
