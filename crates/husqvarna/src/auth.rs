//! Client-credentials login against the Husqvarna identity endpoint.

use async_trait::async_trait;

use mowwatch_core::{AuthenticationError, CredentialSet, IdentityProvider, TokenGrant};

use crate::api::parse_response;
use crate::error::HusqvarnaError;
use crate::models::AuthResponse;

/// HTTP client for the OAuth2 token endpoint.
pub struct AuthClient {
    client: reqwest::Client,
    token_url: String,
}

impl AuthClient {
    pub fn new(token_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), token_url)
    }

    pub fn with_client(client: reqwest::Client, token_url: String) -> Self {
        Self { client, token_url }
    }

    /// Exchange the client id and secret for an access token.
    pub async fn request_token(
        &self,
        credentials: &CredentialSet,
    ) -> Result<AuthResponse, HusqvarnaError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Auth response");
        parse_response(response).await
    }
}

#[async_trait]
impl IdentityProvider for AuthClient {
    async fn authenticate(
        &self,
        credentials: &CredentialSet,
    ) -> Result<TokenGrant, AuthenticationError> {
        let response = self.request_token(credentials).await?;
        Ok(TokenGrant {
            access_token: response.access_token,
            expires_in_secs: response.expires_in,
            scope: response.scope,
        })
    }
}
