//! In-memory collaborators for pipeline tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use mowwatch_core::{
    AccessToken, AuthenticationError, CredentialSet, DeviceState, EventLog, FetchError,
    IdentityProvider, Notifier, NotifyError, StatusSource, TokenCache, TokenGrant,
};
use mowwatch_pipeline::PollCycle;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Issues long-lived tokens; can be switched into a failing mode.
#[derive(Default)]
pub struct FakeIdentity {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn authenticate(
        &self,
        _credentials: &CredentialSet,
    ) -> Result<TokenGrant, AuthenticationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AuthenticationError::Transport("connection refused".into()));
        }
        Ok(TokenGrant {
            access_token: "token".into(),
            expires_in_secs: 86_400,
            scope: "amc:api".into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Status source
// ---------------------------------------------------------------------------

/// Replays a script of fetch results; fails with `Transport` once exhausted.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<DeviceState, FetchError>>>,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub delay: Duration,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<DeviceState, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    pub fn activities(codes: &[&str]) -> Self {
        Self::new(codes.iter().map(|c| Ok(DeviceState::found(*c))).collect())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch_state(&self, _token: &AccessToken) -> Result<DeviceState, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.script.lock().unwrap().pop_front();

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        next.unwrap_or_else(|| Err(FetchError::Transport("script exhausted".into())))
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Records every message; optionally rejects them all.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::HttpStatus(500));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

pub struct Harness {
    pub identity: Arc<FakeIdentity>,
    pub source: Arc<ScriptedSource>,
    pub notifier: Arc<RecordingNotifier>,
    pub event_log: Arc<EventLog>,
}

impl Harness {
    pub fn new(source: ScriptedSource, notifier: RecordingNotifier) -> Self {
        Self {
            identity: Arc::new(FakeIdentity::default()),
            source: Arc::new(source),
            notifier: Arc::new(notifier),
            event_log: Arc::new(EventLog::new(NonZeroUsize::new(100).unwrap())),
        }
    }

    pub fn cycle(&self) -> PollCycle {
        PollCycle::new(
            CredentialSet::new("client", "secret", "key"),
            Arc::new(TokenCache::new(self.identity.clone())),
            self.source.clone(),
            self.notifier.clone(),
            self.event_log.clone(),
        )
    }

    pub async fn descriptions(&self) -> Vec<String> {
        self.event_log
            .recent(usize::MAX)
            .await
            .into_iter()
            .map(|r| r.description)
            .collect()
    }
}
