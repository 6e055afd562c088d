//! Typed subset of the Automower Connect JSON documents.
//!
//! Only the fields the watcher and the status API surface are modelled;
//! everything else in the upstream payload is ignored on decode. Missing
//! fields fall back to their defaults so a sparse document still parses.

use serde::{Deserialize, Serialize};

/// Response of the OAuth2 token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub scope: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Response of `GET /mowers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MowersResponse {
    #[serde(default)]
    pub data: Vec<MowerData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MowerData {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: MowerAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MowerAttributes {
    pub system: MowerSystem,
    pub battery: Battery,
    pub mower: MowerStatus,
    pub planner: Planner,
    pub metadata: Metadata,
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MowerSystem {
    pub name: String,
    pub model: String,
    pub serial_number: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Battery {
    pub battery_percent: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MowerStatus {
    pub mode: String,
    pub activity: String,
    pub inactive_reason: String,
    pub state: String,
    pub error_code: i64,
    pub error_code_timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Planner {
    /// Epoch milliseconds of the next scheduled start, `0` when none.
    pub next_start_timestamp: i64,
    pub restricted_reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub connected: bool,
    pub status_timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}
