//! Mower commands accepted by `POST /mowers/{id}/actions`.

use serde_json::{json, Value};

/// Duration used for `start` / `park` when the caller gives none.
pub const DEFAULT_ACTION_DURATION_MINS: u32 = 60;

/// A command to send to a mower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MowerAction {
    Start { duration_mins: u32 },
    Park { duration_mins: u32 },
    Pause,
    ParkUntilNextSchedule,
    ResumeSchedule,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown mower action '{0}'")]
pub struct UnknownAction(pub String);

impl MowerAction {
    /// Parse a route segment (`start`, `park`, `pause`, `parkschedule`,
    /// `resumeschedule`). `duration_mins` only applies to start/park.
    pub fn parse(name: &str, duration_mins: Option<u32>) -> Result<Self, UnknownAction> {
        let duration_mins = duration_mins.unwrap_or(DEFAULT_ACTION_DURATION_MINS);
        match name {
            "start" => Ok(Self::Start { duration_mins }),
            "park" => Ok(Self::Park { duration_mins }),
            "pause" => Ok(Self::Pause),
            "parkschedule" => Ok(Self::ParkUntilNextSchedule),
            "resumeschedule" => Ok(Self::ResumeSchedule),
            other => Err(UnknownAction(other.to_string())),
        }
    }

    /// JSON:API request body for this action.
    pub fn payload(&self) -> Value {
        match self {
            Self::Start { duration_mins } => json!({
                "data": {"type": "Start", "attributes": {"duration": duration_mins}}
            }),
            Self::Park { duration_mins } => json!({
                "data": {"type": "Park", "attributes": {"duration": duration_mins}}
            }),
            Self::Pause => json!({"data": {"type": "Pause"}}),
            Self::ParkUntilNextSchedule => json!({"data": {"type": "ParkUntilNextSchedule"}}),
            Self::ResumeSchedule => json!({"data": {"type": "ResumeSchedule"}}),
        }
    }

    /// Message announced on the notification channel once the API accepts the action.
    pub fn announcement(&self) -> String {
        match self {
            Self::Start { duration_mins } => {
                format!("Je commence à tondre pour {duration_mins} minutes")
            }
            Self::Park { duration_mins } => {
                format!("Je vais à la station de charge pour {duration_mins} minutes")
            }
            Self::Pause => "Je fais une pause".to_string(),
            Self::ParkUntilNextSchedule => {
                "Je vais me recharger jusqu'à la prochaine tonte".to_string()
            }
            Self::ResumeSchedule => "Je reprends mon planning de tonte".to_string(),
        }
    }
}
