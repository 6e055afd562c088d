//! One poll tick.
//!
//! Steps, in order:
//!
//! 1. Obtain an access token from the shared [`TokenCache`].
//! 2. Fetch the device state, bounded by the fetch timeout.
//! 3. Feed the activity to the [`DiffTracker`].
//! 4. Append the resulting record to the [`EventLog`] (every tick).
//! 5. Notify when the activity changed.
//!
//! A failure in step 1 or 2 aborts the tick before any state is touched.
//! A notification failure is logged and does not undo steps 3-4.

use std::sync::Arc;
use std::time::Duration;

use mowwatch_core::{
    Activity, CredentialSet, DiffTracker, EventLog, FetchError, Notifier, Observation,
    StatusSource, TickError, TokenCache,
};

/// Default bound on a single device status fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// What a successful tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub activity: Activity,
    pub changed: bool,
    /// `true` only when a notification was attempted and delivered.
    pub notified: bool,
}

/// Runtime context of the poller: owns the diff baseline and shares the
/// token cache and event log with the HTTP layer.
pub struct PollCycle {
    credentials: CredentialSet,
    tokens: Arc<TokenCache>,
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    event_log: Arc<EventLog>,
    tracker: DiffTracker,
    fetch_timeout: Duration,
}

impl PollCycle {
    pub fn new(
        credentials: CredentialSet,
        tokens: Arc<TokenCache>,
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        event_log: Arc<EventLog>,
    ) -> Self {
        Self {
            credentials,
            tokens,
            source,
            notifier,
            event_log,
            tracker: DiffTracker::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// The activity the next tick will be compared against.
    pub fn baseline(&self) -> Option<&Activity> {
        self.tracker.baseline()
    }

    /// Execute a single tick.
    pub async fn run_once(&mut self) -> Result<TickReport, TickError> {
        let token = self.tokens.get_token(&self.credentials).await?;

        let state = tokio::time::timeout(self.fetch_timeout, self.source.fetch_state(&token))
            .await
            .map_err(|_| FetchError::Timeout(self.fetch_timeout))??;
        if !state.found {
            return Err(FetchError::NoDevices.into());
        }

        let observation = Observation::now(Activity::from_code(&state.activity));
        tracing::debug!(
            previous = ?self.tracker.baseline().map(Activity::code),
            current = %observation.activity,
            "Comparing activity"
        );

        let transition = self.tracker.observe(&observation);
        self.event_log.append(transition.record).await;

        let mut notified = false;
        if transition.changed {
            tracing::info!(activity = %observation.activity, "Mower activity changed");
            match self.notifier.send(observation.activity.description()).await {
                Ok(()) => notified = true,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to deliver activity notification");
                }
            }
        }

        Ok(TickReport {
            activity: observation.activity,
            changed: transition.changed,
            notified,
        })
    }
}
