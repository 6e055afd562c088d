//! Mower activity codes as reported by the Automower Connect API.
//!
//! Known codes map to a human-readable description. Codes this crate does
//! not know about are kept verbatim in [`Activity::Other`] so that a new
//! firmware value never fails a poll tick.

use std::fmt;

/// What the mower is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Activity {
    Unknown,
    NotApplicable,
    Mowing,
    GoingHome,
    Charging,
    Leaving,
    ParkedInChargingStation,
    StoppedInGarden,
    /// Any code not listed above, stored as received.
    Other(String),
}

impl Activity {
    /// Parse an API activity code. Never fails.
    pub fn from_code(code: &str) -> Self {
        match code {
            "UNKNOWN" => Self::Unknown,
            "NOT_APPLICABLE" => Self::NotApplicable,
            "MOWING" => Self::Mowing,
            "GOING_HOME" => Self::GoingHome,
            "CHARGING" => Self::Charging,
            "LEAVING" => Self::Leaving,
            "PARKED_IN_CS" => Self::ParkedInChargingStation,
            "STOPPED_IN_GARDEN" => Self::StoppedInGarden,
            other => Self::Other(other.to_string()),
        }
    }

    /// The API code for this activity.
    pub fn code(&self) -> &str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::NotApplicable => "NOT_APPLICABLE",
            Self::Mowing => "MOWING",
            Self::GoingHome => "GOING_HOME",
            Self::Charging => "CHARGING",
            Self::Leaving => "LEAVING",
            Self::ParkedInChargingStation => "PARKED_IN_CS",
            Self::StoppedInGarden => "STOPPED_IN_GARDEN",
            Self::Other(code) => code,
        }
    }

    /// Human-readable description used in the event log and notifications.
    ///
    /// Unmapped codes fall back to the raw code.
    pub fn description(&self) -> &str {
        match self {
            Self::Unknown => "Inconnu.",
            Self::NotApplicable => "Non applicable.",
            Self::Mowing => "En train de tondre.",
            Self::GoingHome => "Rentre à la station de charge.",
            Self::Charging => "En train de charger.",
            Self::Leaving => {
                "Quitte actuellement la station de charge et se dirige vers un point de départ."
            }
            Self::ParkedInChargingStation => "Garée dans la station de charge.",
            Self::StoppedInGarden => "Est arrêtée dans le jardin.",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
