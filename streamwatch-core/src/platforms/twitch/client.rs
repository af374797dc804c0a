// File: streamwatch-core/src/platforms/twitch/client.rs

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::http::HttpClient;
use crate::platforms::twitch::requests::stream::{GameData, HelixResponse, StreamData, UserData};
use crate::platforms::twitch::token_cache::TokenCache;

pub const DEFAULT_API_BASE: &str = "https://api.twitch.tv/helix";

/// A small wrapper client for the read-only Helix endpoints the watcher needs.
///
/// Every failure (no token, transport error, bad status, bad JSON) is logged,
/// invalidates the cached token and comes back as `None`. Nothing is retried;
/// the next poll tick is the retry.
pub struct TwitchHelixClient {
    http: Arc<dyn HttpClient>,
    api_base: String,
    client_id: String,
}

impl TwitchHelixClient {
    pub fn new(http: Arc<dyn HttpClient>, client_id: &str) -> Self {
        Self {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            client_id: client_id.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// "Get Users" by login. First record or `None`.
    pub async fn get_user(&self, tokens: &mut TokenCache, login: &str) -> Option<UserData> {
        self.get_data::<UserData>(tokens, "users", "login", login)
            .await
            .and_then(|users| users.into_iter().next())
    }

    /// "Get Games" by id. First record or `None`.
    pub async fn get_category(&self, tokens: &mut TokenCache, category_id: &str) -> Option<GameData> {
        self.get_data::<GameData>(tokens, "games", "id", category_id)
            .await
            .and_then(|games| games.into_iter().next())
    }

    /// "Get Streams" by login.
    ///
    /// `Some(vec![])` means the channel is confirmed offline; `None` means
    /// the lookup itself failed and says nothing about the channel.
    pub async fn get_live_streams(&self, tokens: &mut TokenCache, login: &str) -> Option<Vec<StreamData>> {
        self.get_data::<StreamData>(tokens, "streams", "user_login", login).await
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        tokens: &mut TokenCache,
        endpoint: &str,
        key: &str,
        value: &str,
    ) -> Option<Vec<T>> {
        let Some(cred) = tokens.get_valid_credential().await else {
            warn!("No Twitch app token available; skipping /{endpoint} lookup for {key}={value}");
            return None;
        };

        let url = format!("{}/{}", self.api_base, endpoint);
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", cred.token));
        headers.insert("Client-Id".to_string(), self.client_id.clone());
        let query = vec![(key.to_string(), value.to_string())];

        let resp = match self.http.get(url, query, headers).await {
            Ok(r) => r,
            Err(e) => {
                error!("Helix /{endpoint} network error for {key}={value}: {e}");
                tokens.invalidate();
                return None;
            }
        };

        if !resp.is_success() {
            error!("Helix /{endpoint}: HTTP {} => {}", resp.status, resp.body);
            tokens.invalidate();
            return None;
        }

        match serde_json::from_str::<HelixResponse<T>>(&resp.body) {
            Ok(parsed) => {
                debug!("Helix /{endpoint} {key}={value} returned {} record(s)", parsed.data.len());
                Some(parsed.data)
            }
            Err(e) => {
                error!("Helix /{endpoint} parse error: {e}");
                tokens.invalidate();
                None
            }
        }
    }
}
