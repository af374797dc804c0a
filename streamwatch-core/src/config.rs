// File: streamwatch-core/src/config.rs
//
// Environment-driven settings. `.env` is loaded by the binary before
// `BotConfig::from_env` runs.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::Error;
use crate::platforms::twitch::auth::DEFAULT_AUTH_URL;
use crate::platforms::twitch::client::DEFAULT_API_BASE;
use crate::services::reply_rules::ReplyConfig;

pub const DEFAULT_STREAMER: &str = "ml7support";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct TwitchConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_base: String,
    pub auth_url: String,
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub bot_token: String,
    pub channel_id: String,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub twitch: TwitchConfig,
    /// `None` when either the bot token or channel is unset.
    pub discord: Option<DiscordConfig>,
    pub streamers: Vec<String>,
    pub poll_interval: Duration,
    pub replies: ReplyConfig,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Same as `from_env`, reading from an explicit map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, Error> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("{key} must be set")))
        };

        let twitch = TwitchConfig {
            client_id: require("TWITCH_CLIENT_ID")?,
            client_secret: require("TWITCH_APP_SECRET")?,
            api_base: parse_url("TWITCH_API_BASE", get("TWITCH_API_BASE"), DEFAULT_API_BASE)?,
            auth_url: parse_url("TWITCH_AUTH_URL", get("TWITCH_AUTH_URL"), DEFAULT_AUTH_URL)?,
        };

        let discord = match (get("BOT_TOKEN"), get("DISCORD_CHANNEL_ID")) {
            (Some(bot_token), Some(channel_id)) => Some(DiscordConfig { bot_token, channel_id }),
            _ => {
                debug!("BOT_TOKEN or DISCORD_CHANNEL_ID unset; Discord disabled");
                None
            }
        };

        let streamers = match get("WATCH_STREAMERS") {
            Some(list) => split_list(&list),
            None => vec![DEFAULT_STREAMER.to_string()],
        };
        if streamers.is_empty() {
            return Err(Error::Config("WATCH_STREAMERS must name at least one streamer".into()));
        }

        let poll_interval = match get("POLL_INTERVAL_SECS") {
            Some(raw) => parse_interval(&raw)?,
            None => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        };

        let replies = ReplyConfig {
            react_user_ids: id_set(get("REACT_USER_IDS")),
            gif_user_ids: id_set(get("GIF_USER_IDS")),
            ..ReplyConfig::default()
        };

        Ok(Self {
            twitch,
            discord,
            streamers,
            poll_interval,
            replies,
        })
    }
}

/// Interval in whole seconds; zero is rejected.
pub fn parse_interval(raw: &str) -> Result<Duration, Error> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("POLL_INTERVAL_SECS '{raw}' is not a number: {e}")))?;
    if secs == 0 {
        return Err(Error::Config("POLL_INTERVAL_SECS must be greater than zero".into()));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_url(key: &str, value: Option<String>, default: &str) -> Result<String, Error> {
    let raw = value.unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| Error::Config(format!("{key} '{raw}' is not a valid URL: {e}")))?;
    Ok(raw.trim_end_matches('/').to_string())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn id_set(raw: Option<String>) -> HashSet<String> {
    raw.map(|r| split_list(&r).into_iter().collect()).unwrap_or_default()
}
