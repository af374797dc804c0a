use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use tracing::{info, warn};
use twilight_http::Client as HttpClient;
use twilight_model::channel::message::Embed;
use twilight_model::id::marker::ChannelMarker;
use twilight_model::id::Id;
use twilight_util::builder::embed::{EmbedAuthorBuilder, EmbedBuilder, EmbedFooterBuilder, ImageSource};

use crate::Error;
use crate::services::live_notifier::LiveNotifier;
use streamwatch_common::models::LiveEvent;

pub const LIVE_AUTHOR: &str = "Now Live:";

/// Builds the "Now Live" embed. Image URLs Discord would reject are left out.
pub fn build_live_embed(event: &LiveEvent, color: u32) -> Embed {
    let mut builder = EmbedBuilder::new()
        .title(event.streamer_id.clone())
        .url(event.channel_url())
        .color(color)
        .author(EmbedAuthorBuilder::new(LIVE_AUTHOR))
        .footer(EmbedFooterBuilder::new(event.footer_text()));

    if let Some(avatar) = event.avatar_image_url.as_deref() {
        match ImageSource::url(avatar) {
            Ok(src) => builder = builder.image(src),
            Err(e) => warn!("Skipping avatar image '{}': {}", avatar, e),
        }
    }

    if let Some(art) = event.category_image_url.as_deref() {
        match ImageSource::url(art) {
            Ok(src) => builder = builder.thumbnail(src),
            Err(e) => warn!("Skipping category image '{}': {}", art, e),
        }
    }

    builder.build()
}

/// Posts one embed per live event into a fixed channel.
pub struct DiscordLiveNotifier {
    http: Arc<HttpClient>,
    channel_id: Id<ChannelMarker>,
}

impl DiscordLiveNotifier {
    pub fn new(http: Arc<HttpClient>, channel_id: Id<ChannelMarker>) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl LiveNotifier for DiscordLiveNotifier {
    async fn notify(&self, event: &LiveEvent) -> Result<(), Error> {
        let color = rand::rng().random_range(0..=0xFF_FFFF);
        let embed = build_live_embed(event, color);

        self.http
            .create_message(self.channel_id)
            .embeds(&[embed])
            .await
            .map_err(|e| Error::Platform(format!("Error sending live embed: {e:?}")))?;

        info!("Posted live notification for {} to channel {}", event.streamer_id, self.channel_id);
        Ok(())
    }
}
