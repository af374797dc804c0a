// ========================================================
// File: streamwatch-core/src/platforms/twitch/requests/stream.rs
// ========================================================
use serde::Deserialize;

/// Box art size used for notification thumbnails.
pub const BOX_ART_WIDTH: &str = "500";
pub const BOX_ART_HEIGHT: &str = "800";

/// Every Helix list endpoint wraps its records in `data`.
#[derive(Debug, Deserialize)]
pub struct HelixResponse<T> {
    pub data: Vec<T>,
}

/// Single stream data record from "Get Streams".
#[derive(Debug, Clone, Deserialize)]
pub struct StreamData {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewer_count: u64,
    #[serde(default)]
    pub language: String,
    // Twitch sends `null` instead of `[]` for untagged streams.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_mature: bool,
}

/// Single user record from "Get Users".
#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub login: String,
    #[serde(default)]
    pub profile_image_url: String,
}

/// Single game record from "Get Games".
#[derive(Debug, Clone, Deserialize)]
pub struct GameData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub box_art_url: String,
}

impl GameData {
    /// Box art URL with the `{width}`/`{height}` placeholders filled in.
    pub fn box_art(&self) -> Option<String> {
        if self.box_art_url.is_empty() {
            return None;
        }
        Some(
            self.box_art_url
                .replace("{width}", BOX_ART_WIDTH)
                .replace("{height}", BOX_ART_HEIGHT),
        )
    }
}
