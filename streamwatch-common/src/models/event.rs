use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::models::stream::StreamRecord;

/// Payload handed to a notifier when a streamer goes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveEvent {
    pub streamer_id: String,
    pub title: String,
    pub category_name: String,
    pub is_mature: bool,
    pub tags: BTreeSet<String>,
    pub avatar_image_url: Option<String>,
    pub category_image_url: Option<String>,
}

impl From<&StreamRecord> for LiveEvent {
    fn from(record: &StreamRecord) -> Self {
        Self {
            streamer_id: record.streamer_id.clone(),
            title: record.title.clone(),
            category_name: record.category_name.clone(),
            is_mature: record.is_mature,
            tags: record.tags.clone(),
            avatar_image_url: record.avatar_image_url.clone(),
            category_image_url: record.category_image_url.clone(),
        }
    }
}

impl LiveEvent {
    pub fn channel_url(&self) -> String {
        format!("https://twitch.tv/{}", self.streamer_id)
    }

    /// `Playing <category> | <18+ or empty> | <tags>`
    ///
    /// Tags come from a sorted set, so they are listed alphabetically
    /// rather than in the order Twitch returned them.
    pub fn footer_text(&self) -> String {
        let mature = if self.is_mature { "18+" } else { "" };
        let tags = self.tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        format!("Playing {} | {} | {}", self.category_name, mature, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(is_mature: bool, tags: &[&str]) -> LiveEvent {
        LiveEvent {
            streamer_id: "ml7support".into(),
            title: "Late night".into(),
            category_name: "Just Chatting".into(),
            is_mature,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            avatar_image_url: None,
            category_image_url: None,
        }
    }

    #[test]
    fn footer_lists_mature_flag_and_tags() {
        let e = event(true, &["German", "Chill"]);
        assert_eq!(e.footer_text(), "Playing Just Chatting | 18+ | Chill, German");
    }

    #[test]
    fn footer_keeps_separators_when_empty() {
        let e = event(false, &[]);
        assert_eq!(e.footer_text(), "Playing Just Chatting |  | ");
        assert_eq!(e.channel_url(), "https://twitch.tv/ml7support");
    }
}
