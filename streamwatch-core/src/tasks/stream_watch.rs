use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::cache::LiveStateStore;
use crate::platforms::twitch::client::TwitchHelixClient;
use crate::platforms::twitch::requests::stream::StreamData;
use crate::platforms::twitch::token_cache::TokenCache;
use crate::services::live_notifier::LiveNotifier;
use streamwatch_common::models::{LiveEvent, StreamRecord};

/// Mutable state owned by the poll loop: the app token and what is known to be live.
pub struct PollerContext {
    pub tokens: TokenCache,
    pub store: LiveStateStore,
}

impl PollerContext {
    pub fn new(tokens: TokenCache) -> Self {
        Self {
            tokens,
            store: LiveStateStore::new(),
        }
    }
}

/// Polls Twitch for a fixed set of channels and reports offline -> live edges.
pub struct StreamWatcher {
    helix: TwitchHelixClient,
    streamers: Vec<String>,
    notifier: Arc<dyn LiveNotifier>,
}

impl StreamWatcher {
    /// Duplicate and blank streamer names are dropped; order is kept.
    pub fn new(
        helix: TwitchHelixClient,
        streamers: Vec<String>,
        notifier: Arc<dyn LiveNotifier>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(streamers.len());
        for s in streamers {
            let s = s.trim().to_string();
            if !s.is_empty() && !unique.contains(&s) {
                unique.push(s);
            }
        }
        Self {
            helix,
            streamers: unique,
            notifier,
        }
    }

    pub fn streamers(&self) -> &[String] {
        &self.streamers
    }

    /// Runs one tick: checks every watched streamer in order, then hands each
    /// "went live" event to the notifier. Returns the events that were emitted.
    pub async fn poll_once(&self, ctx: &mut PollerContext) -> Vec<LiveEvent> {
        let mut went_live = Vec::new();

        for streamer in &self.streamers {
            if let Some(event) = self.check_streamer(ctx, streamer).await {
                went_live.push(event);
            }
        }

        for event in &went_live {
            if let Err(e) = self.notifier.notify(event).await {
                error!("Failed to deliver live notification for {}: {:?}", event.streamer_id, e);
            }
        }

        went_live
    }

    async fn check_streamer(&self, ctx: &mut PollerContext, streamer: &str) -> Option<LiveEvent> {
        // A failed lookup is not the same as "offline"; leave state alone.
        let Some(streams) = self.helix.get_live_streams(&mut ctx.tokens, streamer).await else {
            warn!("Live status lookup for {} failed; keeping previous state", streamer);
            return None;
        };

        let tracked = ctx.store.is_live(streamer);
        match (tracked, streams.first()) {
            (false, Some(stream)) => {
                let record = self.build_record(ctx, streamer, stream).await;
                let event = LiveEvent::from(&record);
                info!(
                    "{} went live: '{}' ({}, {} viewers)",
                    streamer, record.title, record.category_name, record.viewer_count
                );
                ctx.store.mark_live(streamer, record);
                Some(event)
            }
            (true, None) => {
                info!("{} went offline", streamer);
                ctx.store.mark_offline(streamer);
                None
            }
            (true, Some(_)) => {
                debug!("{} still live; no change", streamer);
                None
            }
            (false, None) => {
                debug!("{} still offline", streamer);
                None
            }
        }
    }

    /// Builds the record from the stream entry and tries to add the avatar and
    /// category art. Either lookup may fail without affecting the other.
    async fn build_record(&self, ctx: &mut PollerContext, streamer: &str, stream: &StreamData) -> StreamRecord {
        let avatar_image_url = match self.helix.get_user(&mut ctx.tokens, streamer).await {
            Some(user) if !user.profile_image_url.is_empty() => Some(user.profile_image_url),
            Some(_) => None,
            None => {
                debug!("No user data for {}; notification goes out without avatar", streamer);
                None
            }
        };

        let category_image_url = if stream.game_id.is_empty() {
            None
        } else {
            match self.helix.get_category(&mut ctx.tokens, &stream.game_id).await {
                Some(game) => game.box_art(),
                None => {
                    debug!("No category data for game_id={}; notification goes out without box art", stream.game_id);
                    None
                }
            }
        };

        StreamRecord {
            streamer_id: streamer.to_string(),
            category_id: stream.game_id.clone(),
            category_name: stream.game_name.clone(),
            title: stream.title.clone(),
            viewer_count: stream.viewer_count,
            language_code: stream.language.clone(),
            tags: stream.tags.clone().unwrap_or_default().into_iter().collect(),
            is_mature: stream.is_mature,
            avatar_image_url,
            category_image_url,
        }
    }
}

/// Spawns the poll loop. The first tick runs immediately; each tick finishes
/// (notifications included) before the next one is awaited, and late ticks
/// are delayed rather than bunched up.
pub fn spawn_stream_watch_task(
    watcher: StreamWatcher,
    mut ctx: PollerContext,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Stream watcher started for [{}], polling every {:?}",
            watcher.streamers().join(", "),
            period
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let events = watcher.poll_once(&mut ctx).await;
            debug!(
                "Poll tick done: {} new live event(s), {} streamer(s) live",
                events.len(),
                ctx.store.len()
            );
        }
    })
}
