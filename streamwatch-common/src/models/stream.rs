use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};

/// Last-seen metadata for a streamer believed to be live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRecord {
    /// Login name used for lookups, not the display name.
    pub streamer_id: String,
    pub category_id: String,
    pub category_name: String,
    pub title: String,
    pub viewer_count: u64,
    pub language_code: String,
    pub tags: BTreeSet<String>,
    pub is_mature: bool,
    /// Filled in from the user lookup when it succeeds.
    pub avatar_image_url: Option<String>,
    /// Box art with the size placeholders already substituted.
    pub category_image_url: Option<String>,
}
