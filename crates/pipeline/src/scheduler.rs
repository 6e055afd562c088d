//! Periodic driver for [`PollCycle`].
//!
//! Spawns a background task that runs one poll tick per period using
//! `tokio::time::interval`. Ticks are awaited in the loop body, so two
//! cycles never run at once; a tick that overruns its period delays the
//! next one instead of queueing a backlog.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::cycle::PollCycle;
use crate::status::PollerStatus;

/// How often the mower is polled.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

pub struct Scheduler {
    cycle: PollCycle,
    period: Duration,
    status: Arc<PollerStatus>,
}

impl Scheduler {
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(cycle: PollCycle, period: Duration) -> Self {
        assert!(!period.is_zero(), "poll period must be non-zero");
        Self {
            cycle,
            period,
            status: Arc::new(PollerStatus::new()),
        }
    }

    /// Handle to the progress record this scheduler updates.
    pub fn status(&self) -> Arc<PollerStatus> {
        Arc::clone(&self.status)
    }

    /// Run the scheduler on its own task.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }

    /// Run the poll loop until `cancel` is triggered.
    ///
    /// The first tick fires immediately. Cancellation is only observed
    /// between ticks; an in-flight tick always completes.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(interval_secs = self.period.as_secs(), "Mower poller started");

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Mower poller stopping");
                    break;
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }
    }

    async fn tick(&mut self) {
        self.status.mark_running().await;

        match self.cycle.run_once().await {
            Ok(report) => {
                tracing::debug!(
                    activity = %report.activity,
                    changed = report.changed,
                    notified = report.notified,
                    "Poll tick complete"
                );
                self.status.record_success().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Poll tick aborted");
                self.status.record_failure(&e).await;
            }
        }
    }
}
