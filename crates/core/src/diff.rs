//! Last-activity tracking.
//!
//! [`DiffTracker`] remembers the previous activity and turns every new
//! [`Observation`] into an [`EventRecord`] plus a `changed` flag. A record is
//! produced for every observation, changed or not, so the event log doubles
//! as a heartbeat; only `changed` gates notifications.
//!
//! Pure logic, no locking: the poll cycle owns the tracker and calls it once
//! per serialized tick.

use chrono::Utc;

use crate::activity::Activity;
use crate::event_log::EventRecord;
use crate::types::Timestamp;

/// A single device activity reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub activity: Activity,
    pub observed_at: Timestamp,
}

impl Observation {
    pub fn new(activity: Activity, observed_at: Timestamp) -> Self {
        Self {
            activity,
            observed_at,
        }
    }

    /// Observation stamped with the current time.
    pub fn now(activity: Activity) -> Self {
        Self::new(activity, Utc::now())
    }
}

/// Result of feeding one observation to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub record: EventRecord,
    /// `true` when the activity differs from the previous one (always `true`
    /// for the first observation).
    pub changed: bool,
}

#[derive(Debug, Default)]
pub struct DiffTracker {
    previous: Option<Activity>,
}

impl DiffTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The activity the next observation will be compared against.
    pub fn baseline(&self) -> Option<&Activity> {
        self.previous.as_ref()
    }

    /// Record `observation` as the new baseline and describe the transition.
    pub fn observe(&mut self, observation: &Observation) -> Transition {
        let previous = self.previous.replace(observation.activity.clone());

        let changed = previous.as_ref() != Some(&observation.activity);
        let description = format!(
            "{}>{}",
            previous.as_ref().map(Activity::description).unwrap_or(""),
            observation.activity.description()
        );

        Transition {
            record: EventRecord::new(description, observation.observed_at),
            changed,
        }
    }
}
