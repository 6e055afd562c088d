//! Collaborator seams consumed by the poll pipeline.
//!
//! Each trait is object-safe (via `async_trait`) so the pipeline can hold
//! `Arc<dyn ...>` handles and tests can substitute in-memory fakes.

use async_trait::async_trait;

use crate::credentials::CredentialSet;
use crate::error::{AuthenticationError, FetchError, NotifyError};
use crate::token_cache::AccessToken;

/// A freshly issued access token, as returned by the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    /// Declared lifetime of the token in seconds.
    pub expires_in_secs: u64,
    pub scope: String,
}

/// The part of a device status response the pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    /// Raw activity code of the first device.
    pub activity: String,
    /// `false` when the response contained zero devices.
    pub found: bool,
}

impl DeviceState {
    pub fn found(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            found: true,
        }
    }

    pub fn missing() -> Self {
        Self {
            activity: String::new(),
            found: false,
        }
    }
}

/// Issues access tokens for a credential set.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &CredentialSet,
    ) -> Result<TokenGrant, AuthenticationError>;
}

/// Reports the current state of the watched device.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_state(&self, token: &AccessToken) -> Result<DeviceState, FetchError>;
}

/// Fire-and-forget outbound message channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}
