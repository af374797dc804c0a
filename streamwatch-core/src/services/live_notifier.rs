use async_trait::async_trait;
use tracing::info;

use crate::Error;
use streamwatch_common::models::LiveEvent;

/// Receives "went live" events from the stream watcher.
///
/// Called once per event, sequentially, from inside the poll tick. A returned
/// error is logged by the watcher and does not affect other events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveNotifier: Send + Sync {
    async fn notify(&self, event: &LiveEvent) -> Result<(), Error>;
}

/// Writes events to the log only. Used with `--watch-only`.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl LiveNotifier for LogNotifier {
    async fn notify(&self, event: &LiveEvent) -> Result<(), Error> {
        info!(
            "Now live: {} ({}) - {} - {}",
            event.streamer_id,
            event.channel_url(),
            event.title,
            event.footer_text()
        );
        Ok(())
    }
}
