use std::sync::Arc;

use mowwatch_core::{CredentialSet, EventLog, Notifier, TokenCache};
use mowwatch_husqvarna::MowerApi;
use mowwatch_pipeline::PollerStatus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Observations recorded by the poller.
    pub event_log: Arc<EventLog>,
    /// Token cache shared with the poller, so both reuse one access token.
    pub tokens: Arc<TokenCache>,
    pub credentials: Arc<CredentialSet>,
    pub mower_api: Arc<MowerApi>,
    /// Channel for action announcements.
    pub notifier: Arc<dyn Notifier>,
    pub poller: Arc<PollerStatus>,
}
