//! In-process stand-in for the Husqvarna identity and Automower Connect
//! endpoints, served by axum on an ephemeral localhost port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};

pub const MOCK_TOKEN: &str = "mock-token";

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    mowers: Arc<Value>,
    token_forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    requests: Arc<Mutex<Vec<Captured>>>,
}

pub struct MockUpstream {
    pub base_url: String,
    state: MockState,
}

impl MockUpstream {
    /// Serve `mowers` as the `GET /mowers` document.
    pub async fn start(mowers: Value) -> Self {
        let state = MockState {
            mowers: Arc::new(mowers),
            token_forms: Arc::default(),
            requests: Arc::default(),
        };

        let app = Router::new()
            .route("/oauth2/token", post(token))
            .route("/mowers", get(list_mowers))
            .route("/mowers/{id}", get(get_mower))
            .route("/mowers/{id}/actions", post(action))
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

    pub fn token_forms(&self) -> Vec<HashMap<String, String>> {
        self.state.token_forms.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// A `GET /mowers` document listing one mower per activity code.
pub fn mowers_document(activities: &[(&str, &str)]) -> Value {
    let data: Vec<Value> = activities
        .iter()
        .map(|(id, activity)| {
            json!({
                "type": "mower",
                "id": id,
                "attributes": {
                    "system": {"name": "Tondeuse", "model": "AUTOMOWER 405X", "serialNumber": 1},
                    "battery": {"batteryPercent": 80},
                    "mower": {"mode": "MAIN_AREA", "activity": activity, "state": "IN_OPERATION"},
                    "metadata": {"connected": true, "statusTimestamp": 1717236000000_i64}
                }
            })
        })
        .collect();
    json!({ "data": data })
}

fn capture(state: &MockState, path: String, headers: HeaderMap, body: String) {
    state.requests.lock().unwrap().push(Captured {
        path,
        headers,
        body,
    });
}

async fn token(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    state.token_forms.lock().unwrap().push(form);
    Json(json!({
        "access_token": MOCK_TOKEN,
        "scope": "iam:read amc:api",
        "expires_in": 86399,
        "provider": "husqvarna",
        "user_id": "user-1",
        "token_type": "Bearer"
    }))
}

async fn list_mowers(State(state): State<MockState>, headers: HeaderMap) -> Json<Value> {
    capture(&state, "/mowers".into(), headers, String::new());
    Json((*state.mowers).clone())
}

async fn get_mower(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    capture(&state, format!("/mowers/{id}"), headers, String::new());
    let found = state.mowers["data"]
        .as_array()
        .and_then(|mowers| mowers.iter().find(|m| m["id"] == id.as_str()).cloned());
    match found {
        Some(mower) => Json(json!({ "data": mower })).into_response(),
        None => (StatusCode::NOT_FOUND, "mower not found").into_response(),
    }
}

/// Accepts every command with `202` and an empty body, like the real API.
async fn action(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    capture(&state, format!("/mowers/{id}/actions"), headers, body);
    StatusCode::ACCEPTED
}
