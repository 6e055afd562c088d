//! Query parameter types for API handlers.

use serde::Deserialize;

/// Records returned by `GET /events` when no limit is given.
pub const DEFAULT_EVENT_LIMIT: usize = 100;

/// `?limit=` for the event listing.
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

/// `?duration=` in minutes, used by `start` and `park`.
#[derive(Debug, Deserialize)]
pub struct ActionParams {
    pub duration: Option<u32>,
}
