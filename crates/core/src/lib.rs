//! Core domain types and the in-memory state of the mower watcher.
//!
//! - [`activity`]: device activity codes and their descriptions.
//! - [`token_cache`]: lazily refreshed, single-flight access token cache.
//! - [`event_log`]: bounded, thread-safe log of observations.
//! - [`diff`]: last-activity tracker that turns observations into records.
//! - [`provider`]: collaborator traits (identity, status source, notifier).
//!
//! Nothing in this crate performs HTTP itself; network-facing
//! implementations of the [`provider`] traits live in
//! `mowwatch-husqvarna` and `mowwatch-events`.

pub mod activity;
pub mod credentials;
pub mod diff;
pub mod error;
pub mod event_log;
pub mod provider;
pub mod token_cache;
pub mod types;

pub use activity::Activity;
pub use credentials::CredentialSet;
pub use diff::{DiffTracker, Observation, Transition};
pub use error::{AuthenticationError, FetchError, NotifyError, TickError};
pub use event_log::{EventLog, EventRecord};
pub use provider::{DeviceState, IdentityProvider, Notifier, StatusSource, TokenGrant};
pub use token_cache::{AccessToken, TokenCache};
