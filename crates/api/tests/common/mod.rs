#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get as get_route, post as post_route};
use axum::{Json, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mowwatch_api::config::ServerConfig;
use mowwatch_api::router::build_app_router;
use mowwatch_api::state::AppState;
use mowwatch_core::{
    AuthenticationError, CredentialSet, EventLog, IdentityProvider, Notifier, NotifyError,
    TokenCache, TokenGrant,
};
use mowwatch_husqvarna::MowerApi;
use mowwatch_pipeline::PollerStatus;
use serde_json::{json, Value};

/// Nothing listens on the discard port, so every device API call fails fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

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
            return Err(AuthenticationError::Rejected {
                status: 401,
                body: "invalid_client".into(),
            });
        }
        Ok(TokenGrant {
            access_token: "token".into(),
            expires_in_secs: 86_400,
            scope: "amc:api".into(),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Device API stand-in
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct UpstreamState {
    reject_actions: Arc<AtomicBool>,
    actions: Arc<Mutex<Vec<(String, Value)>>>,
}

/// Automower Connect served by axum on an ephemeral localhost port.
///
/// Knows a single mower, `abc-123`, parked in its charging station.
pub struct MockDeviceApi {
    pub base_url: String,
    state: UpstreamState,
}

impl MockDeviceApi {
    pub async fn start() -> Self {
        let state = UpstreamState::default();
        let app = Router::new()
            .route("/mowers", get_route(upstream_list))
            .route("/mowers/{id}", get_route(upstream_mower))
            .route("/mowers/{id}/actions", post_route(upstream_action))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Answer every subsequent action with `500`.
    pub fn reject_actions(&self) {
        self.state.reject_actions.store(true, Ordering::SeqCst);
    }

    /// Accepted `(mower_id, payload)` pairs, in arrival order.
    pub fn actions(&self) -> Vec<(String, Value)> {
        self.state.actions.lock().unwrap().clone()
    }
}

fn parked_mower() -> Value {
    json!({
        "type": "mower",
        "id": "abc-123",
        "attributes": {
            "system": {"name": "Tondeuse", "model": "AUTOMOWER 405X", "serialNumber": 1},
            "battery": {"batteryPercent": 100},
            "mower": {"mode": "HOME", "activity": "PARKED_IN_CS", "state": "RESTRICTED"},
            "metadata": {"connected": true, "statusTimestamp": 1717236000000_i64}
        }
    })
}

async fn upstream_list() -> Json<Value> {
    Json(json!({ "data": [parked_mower()] }))
}

async fn upstream_mower(Path(id): Path<String>) -> Response<Body> {
    if id == "abc-123" {
        Json(json!({ "data": parked_mower() })).into_response()
    } else {
        (StatusCode::NOT_FOUND, "mower not found").into_response()
    }
}

async fn upstream_action(
    State(state): State<UpstreamState>,
    Path(id): Path<String>,
    body: String,
) -> StatusCode {
    if state.reject_actions.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let payload = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.actions.lock().unwrap().push((id, payload));
    StatusCode::ACCEPTED
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        poll_interval_secs: 60,
        event_log_capacity: NonZeroUsize::new(100).unwrap(),
        upstream_timeout_secs: 5,
        static_dir: None,
        husqvarna_auth_url: "http://127.0.0.1:9/oauth2/token".to_string(),
        husqvarna_api_url: UNREACHABLE_API.to_string(),
    }
}

pub fn static_fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/static")
}

/// The router plus handles on the collaborators behind it.
pub struct TestApp {
    pub router: Router,
    pub identity: Arc<FakeIdentity>,
    pub notifier: Arc<RecordingNotifier>,
    pub event_log: Arc<EventLog>,
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config(), Arc::new(PollerStatus::new()))
}

/// A test app whose device API calls reach `upstream`.
pub fn build_test_app_against(upstream: &MockDeviceApi) -> TestApp {
    let config = ServerConfig {
        husqvarna_api_url: upstream.base_url.clone(),
        ..test_config()
    };
    build_test_app_with(config, Arc::new(PollerStatus::new()))
}

/// Build the full application router, using the same middleware stack as
/// production, around in-memory collaborators.
pub fn build_test_app_with(config: ServerConfig, poller: Arc<PollerStatus>) -> TestApp {
    let identity = Arc::new(FakeIdentity::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let event_log = Arc::new(EventLog::new(config.event_log_capacity));

    let state = AppState {
        config: Arc::new(config.clone()),
        event_log: Arc::clone(&event_log),
        tokens: Arc::new(TokenCache::new(identity.clone())),
        credentials: Arc::new(CredentialSet::new("client", "secret", "key")),
        mower_api: Arc::new(MowerApi::new(
            config.husqvarna_api_url.clone(),
            "key".to_string(),
        )),
        notifier: notifier.clone(),
        poller,
    };

    TestApp {
        router: build_app_router(state, &config),
        identity,
        notifier,
        event_log,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
