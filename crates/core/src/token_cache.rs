//! Lazily refreshed access token cache.
//!
//! [`TokenCache`] holds at most one token for the process's credential set.
//! A caller that finds the token missing or inside the safety margin performs
//! the refresh while holding the cache mutex, so concurrent callers queue on
//! the mutex and then read the token that single refresh stored.
//!
//! There is no background refresh: the next caller after expiry pays for it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::credentials::CredentialSet;
use crate::error::AuthenticationError;
use crate::provider::{IdentityProvider, TokenGrant};

/// Lead time before expiry at which a token is considered stale.
pub const SAFETY_MARGIN: Duration = Duration::from_secs(300);

/// Default bound on a single identity endpoint call.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// AccessToken
// ---------------------------------------------------------------------------

/// Bearer token handed to the device API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Arc<str>);

impl AccessToken {
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// CachedToken
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: AccessToken,
    expires_at: Instant,
    scope: String,
}

impl CachedToken {
    fn from_grant(grant: TokenGrant, issued_at: Instant) -> Self {
        // An unrepresentable lifetime is treated as already expired.
        let expires_at = issued_at
            .checked_add(Duration::from_secs(grant.expires_in_secs))
            .unwrap_or(issued_at);
        Self {
            access_token: AccessToken::new(grant.access_token),
            expires_at,
            scope: grant.scope,
        }
    }

    /// `now < expires_at - margin`, written without the subtraction.
    fn is_fresh(&self, now: Instant, margin: Duration) -> bool {
        match now.checked_add(margin) {
            Some(deadline) => deadline < self.expires_at,
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// TokenCache
// ---------------------------------------------------------------------------

/// Single-flight cache in front of an [`IdentityProvider`].
pub struct TokenCache {
    provider: Arc<dyn IdentityProvider>,
    safety_margin: Duration,
    auth_timeout: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Create an empty cache using the standard 300 s safety margin.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            safety_margin: SAFETY_MARGIN,
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            cached: Mutex::new(None),
        }
    }

    /// Override the bound on each identity endpoint call.
    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    /// Return a usable access token, refreshing it first if needed.
    ///
    /// On failure the previously cached token, if any, is kept as-is.
    pub async fn get_token(
        &self,
        credentials: &CredentialSet,
    ) -> Result<AccessToken, AuthenticationError> {
        let mut guard = self.cached.lock().await;

        match guard.as_ref() {
            Some(token) if token.is_fresh(Instant::now(), self.safety_margin) => {
                tracing::debug!(
                    refresh_in_secs = token
                        .expires_at
                        .saturating_duration_since(Instant::now())
                        .saturating_sub(self.safety_margin)
                        .as_secs(),
                    "Reusing cached access token"
                );
                return Ok(token.access_token.clone());
            }
            Some(_) => tracing::info!("Access token near expiry, re-authenticating"),
            None => tracing::info!("No access token cached, authenticating"),
        }

        let grant = tokio::time::timeout(self.auth_timeout, self.provider.authenticate(credentials))
            .await
            .map_err(|_| AuthenticationError::Timeout(self.auth_timeout))??;

        let token = CachedToken::from_grant(grant, Instant::now());
        tracing::info!(
            scope = %token.scope,
            expires_in_secs = token
                .expires_at
                .saturating_duration_since(Instant::now())
                .as_secs(),
            "Access token refreshed"
        );

        let access_token = token.access_token.clone();
        *guard = Some(token);
        Ok(access_token)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
