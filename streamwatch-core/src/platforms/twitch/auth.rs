use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::Error;
use crate::http::HttpClient;

pub const DEFAULT_AUTH_URL: &str = "https://id.twitch.tv/oauth2/token";

/// Matches Twitch's JSON from the token endpoint
#[derive(Debug, Deserialize)]
pub struct TwitchTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub token_type: String, // e.g. "bearer"
}

/// A freshly issued token; `expires_in` is relative to the moment of issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// Anything that can mint a new app access token.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn exchange(&self) -> Result<IssuedToken, Error>;
}

/// Twitch client-credentials flow: a static client id/secret pair, no user involved.
pub struct ClientCredentialsAuthenticator {
    http: Arc<dyn HttpClient>,
    pub client_id: String,
    client_secret: String,
    token_url: String,
}

impl ClientCredentialsAuthenticator {
    pub fn new(http: Arc<dyn HttpClient>, client_id: String, client_secret: String) -> Self {
        Self {
            http,
            client_id,
            client_secret,
            token_url: DEFAULT_AUTH_URL.to_string(),
        }
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsAuthenticator {
    async fn exchange(&self) -> Result<IssuedToken, Error> {
        let params = vec![
            ("client_id".to_string(),     self.client_id.clone()),
            ("client_secret".to_string(), self.client_secret.clone()),
            ("grant_type".to_string(),    "client_credentials".to_string()),
        ];

        let resp = self.http
            .post_form(self.token_url.clone(), params)
            .await
            .map_err(|e| Error::Auth(format!("HTTP error requesting app token: {e}")))?;

        if !resp.is_success() {
            return Err(Error::Auth(format!(
                "Twitch token endpoint error: HTTP {} => {}",
                resp.status, resp.body
            )));
        }

        let token: TwitchTokenResponse = serde_json::from_str(&resp.body)?;

        if !token.token_type.eq_ignore_ascii_case("bearer") {
            debug!("Unexpected token_type '{}' from Twitch; using it as a bearer token anyway", token.token_type);
        }

        Ok(IssuedToken {
            access_token: token.access_token,
            expires_in: token.expires_in,
        })
    }
}
