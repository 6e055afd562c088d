//! REST client for the Automower Connect API.
//!
//! Every request carries the bearer token, the application API key and the
//! `Authorization-Provider: husqvarna` header the API requires.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use mowwatch_core::{AccessToken, DeviceState, FetchError, StatusSource};

use crate::action::MowerAction;
use crate::error::HusqvarnaError;
use crate::models::MowersResponse;

/// Content type the actions endpoint expects.
const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// HTTP client for the Automower Connect API.
pub struct MowerApi {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl MowerApi {
    /// Create a client with a default [`reqwest::Client`].
    ///
    /// * `api_url` - Base URL, e.g. `https://api.amc.husqvarna.dev/v1`.
    pub fn new(api_url: String, api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// `GET /mowers` -- every mower on the account with its current status.
    pub async fn list_mowers(&self, token: &AccessToken) -> Result<MowersResponse, HusqvarnaError> {
        let response = self
            .authorized(self.client.get(format!("{}/mowers", self.api_url)), token)
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Mower list response");
        parse_response(response).await
    }

    /// `GET /mowers/{id}` -- the raw status document of one mower.
    pub async fn get_mower(
        &self,
        token: &AccessToken,
        mower_id: &str,
    ) -> Result<serde_json::Value, HusqvarnaError> {
        let response = self
            .authorized(
                self.client
                    .get(format!("{}/mowers/{}", self.api_url, mower_id)),
                token,
            )
            .send()
            .await?;

        parse_response(response).await
    }

    /// `POST /mowers/{id}/actions` -- send a command to a mower.
    ///
    /// The API usually answers `202 Accepted` with an empty body, which is
    /// returned as `Value::Null`.
    pub async fn send_action(
        &self,
        token: &AccessToken,
        mower_id: &str,
        action: &MowerAction,
    ) -> Result<serde_json::Value, HusqvarnaError> {
        let response = self
            .authorized(
                self.client
                    .post(format!("{}/mowers/{}/actions", self.api_url, mower_id)),
                token,
            )
            .header(reqwest::header::CONTENT_TYPE, JSON_API_CONTENT_TYPE)
            .body(action.payload().to_string())
            .send()
            .await?;

        let body = ensure_success(response).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
        token: &AccessToken,
    ) -> reqwest::RequestBuilder {
        request
            .bearer_auth(token.as_str())
            .header("X-Api-Key", &self.api_key)
            .header("Authorization-Provider", "husqvarna")
    }
}

#[async_trait]
impl StatusSource for MowerApi {
    /// Activity of the first mower on the account.
    async fn fetch_state(&self, token: &AccessToken) -> Result<DeviceState, FetchError> {
        let mowers = self.list_mowers(token).await?;

        Ok(match mowers.data.first() {
            Some(mower) => {
                tracing::debug!(
                    mower_id = %mower.id,
                    activity = %mower.attributes.mower.activity,
                    "Fetched mower status"
                );
                DeviceState::found(mower.attributes.mower.activity.clone())
            }
            None => DeviceState::missing(),
        })
    }
}

/// Mower ids are UUIDs; anything outside `[A-Za-z0-9-]` is refused before
/// it can reach a URL path.
pub fn is_valid_mower_id(mower_id: &str) -> bool {
    !mower_id.is_empty()
        && mower_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// ---- shared response helpers ----

/// Return the response unchanged on 2xx, or an [`HusqvarnaError::ApiError`]
/// with the status and body text otherwise.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, HusqvarnaError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        tracing::warn!(status = status.as_u16(), body = %body, "Husqvarna request failed");
        return Err(HusqvarnaError::ApiError {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Decode a successful JSON body, keeping decode failures distinct from
/// transport failures.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, HusqvarnaError> {
    let body = ensure_success(response).await?.text().await?;
    Ok(serde_json::from_str(&body)?)
}
