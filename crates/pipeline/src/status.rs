//! Shared view of the scheduler's progress, read by the health endpoint.

use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;

use mowwatch_core::types::Timestamp;
use mowwatch_core::TickError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    /// Waiting for the next tick.
    Idle,
    /// A poll cycle is executing.
    Running,
}

/// Point-in-time copy of [`PollerStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollerSnapshot {
    pub state: SchedulerState,
    /// Completed ticks, successful or not.
    pub ticks: u64,
    pub last_tick_at: Option<Timestamp>,
    pub last_success_at: Option<Timestamp>,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

impl PollerSnapshot {
    /// `false` while the most recent tick failed.
    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures == 0
    }
}

impl Default for PollerSnapshot {
    fn default() -> Self {
        Self {
            state: SchedulerState::Idle,
            ticks: 0,
            last_tick_at: None,
            last_success_at: None,
            consecutive_failures: 0,
            last_error: None,
        }
    }
}

/// Written by the scheduler task only; read from anywhere.
#[derive(Debug, Default)]
pub struct PollerStatus {
    inner: RwLock<PollerSnapshot>,
}

impl PollerStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> PollerSnapshot {
        self.inner.read().await.clone()
    }

    pub(crate) async fn mark_running(&self) {
        self.inner.write().await.state = SchedulerState::Running;
    }

    pub(crate) async fn record_success(&self) {
        let now = Utc::now();
        let mut status = self.inner.write().await;
        status.state = SchedulerState::Idle;
        status.ticks += 1;
        status.last_tick_at = Some(now);
        status.last_success_at = Some(now);
        status.consecutive_failures = 0;
        status.last_error = None;
    }

    pub(crate) async fn record_failure(&self, error: &TickError) {
        let mut status = self.inner.write().await;
        status.state = SchedulerState::Idle;
        status.ticks += 1;
        status.last_tick_at = Some(Utc::now());
        status.consecutive_failures += 1;
        status.last_error = Some(error.to_string());
    }
}
