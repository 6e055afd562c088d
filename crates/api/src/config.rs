use std::num::NonZeroUsize;
use std::path::PathBuf;

use mowwatch_core::CredentialSet;
use mowwatch_events::DiscordKeys;
use mowwatch_husqvarna::{DEFAULT_API_URL, DEFAULT_AUTH_URL};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Secrets are
/// kept apart in [`Secrets`] so this struct can be logged freely.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds between two poll ticks (default: `60`).
    pub poll_interval_secs: u64,
    /// Records kept by the in-memory event log (default: `100`).
    pub event_log_capacity: NonZeroUsize,
    /// Timeout applied to every outbound call (default: `30`).
    pub upstream_timeout_secs: u64,
    /// Directory served at `/` when set.
    pub static_dir: Option<PathBuf>,
    pub husqvarna_auth_url: String,
    pub husqvarna_api_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `8080`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:8080`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `POLL_INTERVAL_SECS`    | `60`                       |
    /// | `EVENT_LOG_CAPACITY`    | `100`                      |
    /// | `UPSTREAM_TIMEOUT_SECS` | `30`                       |
    /// | `STATIC_DIR`            | unset                      |
    /// | `HUSQVARNA_AUTH_URL`    | Husqvarna identity service |
    /// | `HUSQVARNA_API_URL`     | Automower Connect API      |
    ///
    /// # Panics
    ///
    /// Panics on values that do not parse, so misconfiguration fails at
    /// startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let port: u16 = var("PORT", "8080")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:8080")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let poll_interval_secs: u64 = var("POLL_INTERVAL_SECS", "60")
            .parse()
            .expect("POLL_INTERVAL_SECS must be a valid u64");
        assert!(poll_interval_secs > 0, "POLL_INTERVAL_SECS must be positive");

        let event_log_capacity: NonZeroUsize = var("EVENT_LOG_CAPACITY", "100")
            .parse()
            .expect("EVENT_LOG_CAPACITY must be a positive integer");

        let upstream_timeout_secs: u64 = var("UPSTREAM_TIMEOUT_SECS", "30")
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        let static_dir = lookup("STATIC_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host: var("HOST", "0.0.0.0"),
            port,
            cors_origins,
            request_timeout_secs,
            poll_interval_secs,
            event_log_capacity,
            upstream_timeout_secs,
            static_dir,
            husqvarna_auth_url: var("HUSQVARNA_AUTH_URL", DEFAULT_AUTH_URL),
            husqvarna_api_url: var("HUSQVARNA_API_URL", DEFAULT_API_URL),
        }
    }
}

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

/// Credentials read from the environment. Never logged.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub credentials: CredentialSet,
    /// `None` routes notifications to the log only.
    pub discord: Option<DiscordKeys>,
}

impl Secrets {
    /// Load secrets from the environment.
    ///
    /// | Env Var                   | Required                        |
    /// |---------------------------|---------------------------------|
    /// | `HUSQVARNA_CLIENT_ID`     | yes                             |
    /// | `HUSQVARNA_CLIENT_SECRET` | yes                             |
    /// | `HUSQVARNA_API_KEY`       | no, defaults to the client id   |
    /// | `DISCORD_WEBHOOK_ID`      | no                              |
    /// | `DISCORD_WEBHOOK_TOKEN`   | no                              |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let client_id = lookup("HUSQVARNA_CLIENT_ID").expect("HUSQVARNA_CLIENT_ID must be set");
        let client_secret =
            lookup("HUSQVARNA_CLIENT_SECRET").expect("HUSQVARNA_CLIENT_SECRET must be set");
        let api_key = lookup("HUSQVARNA_API_KEY").unwrap_or_else(|| client_id.clone());

        let discord = match (lookup("DISCORD_WEBHOOK_ID"), lookup("DISCORD_WEBHOOK_TOKEN")) {
            (Some(webhook_id), Some(webhook_token)) => Some(DiscordKeys {
                webhook_id,
                webhook_token,
            }),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Only one of DISCORD_WEBHOOK_ID / DISCORD_WEBHOOK_TOKEN is set, ignoring both"
                );
                None
            }
        };

        Self {
            credentials: CredentialSet::new(client_id, client_secret, api_key),
            discord,
        }
    }
}
