//! Husqvarna Automower Connect clients.
//!
//! - [`auth`]: client-credentials login against the Husqvarna identity
//!   endpoint; implements [`mowwatch_core::IdentityProvider`].
//! - [`api`]: Automower Connect REST calls (list, detail, actions);
//!   implements [`mowwatch_core::StatusSource`].
//! - [`action`]: the mower commands the API accepts.
//! - [`models`]: typed subset of the API's JSON documents.

pub mod action;
pub mod api;
pub mod auth;
pub mod error;
pub mod models;

use std::time::Duration;

pub use action::MowerAction;
pub use api::MowerApi;
pub use auth::AuthClient;
pub use error::HusqvarnaError;

/// Husqvarna OAuth2 token endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://api.authentication.husqvarnagroup.dev/v1/oauth2/token";

/// Automower Connect API base URL.
pub const DEFAULT_API_URL: &str = "https://api.amc.husqvarna.dev/v1";

/// Build a [`reqwest::Client`] whose requests all give up after `timeout`.
pub fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to build reqwest HTTP client")
}
