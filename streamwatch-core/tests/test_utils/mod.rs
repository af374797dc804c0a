// File: streamwatch-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use streamwatch_common::models::LiveEvent;
use streamwatch_common::traits::Clock;
use streamwatch_core::Error;
use streamwatch_core::http::{HttpClient, HttpResponse};
use streamwatch_core::platforms::twitch::{ClientCredentialsAuthenticator, TokenCache, TwitchHelixClient};
use streamwatch_core::services::LiveNotifier;
use streamwatch_core::tasks::{PollerContext, StreamWatcher};

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-secret";

/// What the mock answers for one request.
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(String),
    Status(u16, String),
    TransportError,
}

#[derive(Debug, Clone)]
pub struct RecordedGet {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
}

/// Scripted Twitch.
///
/// POSTs go to the token endpoint and, unless `fail_token` is set, return
/// `token-1`, `token-2`, ... with `token_ttl` seconds to live. GETs are routed
/// by the last path segment (`streams`, `users`, `games`); each route pops its
/// queue and keeps repeating the last reply once one is left. Unscripted
/// routes answer `{"data":[]}`.
pub struct MockHttpClient {
    pub token_ttl: Mutex<u64>,
    pub fail_token: Mutex<bool>,
    pub token_body: Mutex<Option<String>>,
    routes: Mutex<HashMap<String, VecDeque<MockReply>>>,
    pub posts: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub gets: Mutex<Vec<RecordedGet>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            token_ttl: Mutex::new(3600),
            fail_token: Mutex::new(false),
            token_body: Mutex::new(None),
            routes: Mutex::new(HashMap::new()),
            posts: Mutex::new(Vec::new()),
            gets: Mutex::new(Vec::new()),
        }
    }

    pub fn script(&self, endpoint: &str, replies: Vec<MockReply>) {
        self.routes
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), replies.into_iter().collect());
    }

    pub fn set_token_ttl(&self, ttl: u64) {
        *self.token_ttl.lock().unwrap() = ttl;
    }

    pub fn set_fail_token(&self, fail: bool) {
        *self.fail_token.lock().unwrap() = fail;
    }

    /// Replaces the token endpoint's 200 body verbatim.
    pub fn set_token_body(&self, body: Option<String>) {
        *self.token_body.lock().unwrap() = body;
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn gets_to(&self, endpoint: &str) -> Vec<RecordedGet> {
        self.gets
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.url.ends_with(&format!("/{endpoint}")))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_form(
        &self,
        url: String,
        form: Vec<(String, String)>,
    ) -> Result<HttpResponse, Error> {
        let n = {
            let mut posts = self.posts.lock().unwrap();
            posts.push((url, form));
            posts.len()
        };
        if *self.fail_token.lock().unwrap() {
            return Ok(HttpResponse {
                status: 400,
                body: r#"{"status":400,"message":"invalid client secret"}"#.into(),
            });
        }
        if let Some(body) = self.token_body.lock().unwrap().clone() {
            return Ok(HttpResponse { status: 200, body });
        }
        let ttl = *self.token_ttl.lock().unwrap();
        Ok(HttpResponse {
            status: 200,
            body: format!(r#"{{"access_token":"token-{n}","expires_in":{ttl},"token_type":"bearer"}}"#),
        })
    }

    async fn get(
        &self,
        url: String,
        query: Vec<(String, String)>,
        headers: HashMap<String, String>,
    ) -> Result<HttpResponse, Error> {
        let endpoint = url.rsplit('/').next().unwrap_or_default().to_string();
        self.gets.lock().unwrap().push(RecordedGet { url, query, headers });

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&endpoint) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply.unwrap_or_else(|| MockReply::Json(r#"{"data":[]}"#.into())) {
            MockReply::Json(body) => Ok(HttpResponse { status: 200, body }),
            MockReply::Status(status, body) => Ok(HttpResponse { status, body }),
            MockReply::TransportError => Err(Error::Platform("connection reset".into())),
        }
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<LiveEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<LiveEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl LiveNotifier for RecordingNotifier {
    async fn notify(&self, event: &LiveEvent) -> Result<(), Error> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub fn token_cache(http: &Arc<MockHttpClient>, clock: &Arc<ManualClock>) -> TokenCache {
    let authenticator = ClientCredentialsAuthenticator::new(
        http.clone(),
        CLIENT_ID.to_string(),
        CLIENT_SECRET.to_string(),
    );
    TokenCache::new(Arc::new(authenticator), clock.clone())
}

pub fn helix(http: &Arc<MockHttpClient>) -> TwitchHelixClient {
    TwitchHelixClient::new(http.clone(), CLIENT_ID)
}

pub fn build_watcher(
    http: &Arc<MockHttpClient>,
    streamers: &[&str],
    notifier: &Arc<RecordingNotifier>,
) -> (StreamWatcher, PollerContext) {
    let clock = Arc::new(ManualClock::new());
    let watcher = StreamWatcher::new(
        helix(http),
        streamers.iter().map(|s| s.to_string()).collect(),
        notifier.clone(),
    );
    (watcher, PollerContext::new(token_cache(http, &clock)))
}

pub fn live_body(login: &str, game_id: &str, game_name: &str) -> String {
    format!(
        r#"{{"data":[{{"id":"40000","user_id":"1","user_login":"{login}","user_name":"{login}",
        "game_id":"{game_id}","game_name":"{game_name}","type":"live","title":"Hallo zusammen",
        "viewer_count":128,"started_at":"2024-05-01T11:58:00Z","language":"de",
        "tags":["Deutsch","Chill"],"is_mature":false}}],"pagination":{{}}}}"#
    )
}

pub fn user_body(login: &str) -> String {
    format!(
        r#"{{"data":[{{"id":"1","login":"{login}","display_name":"{login}",
        "profile_image_url":"https://static-cdn.jtvnw.net/jtv_user_pictures/{login}-300x300.png"}}]}}"#
    )
}

pub fn game_body(game_id: &str, name: &str) -> String {
    format!(
        r#"{{"data":[{{"id":"{game_id}","name":"{name}",
        "box_art_url":"https://static-cdn.jtvnw.net/ttv-boxart/{game_id}-{{width}}x{{height}}.jpg"}}]}}"#
    )
}

pub const EMPTY: &str = r#"{"data":[]}"#;
