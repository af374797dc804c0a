// Lazily refreshed app access token.
//
// Usage from the Helix client:
// ```rust
// let Some(cred) = tokens.get_valid_credential().await else { return None };
// ```

use std::sync::Arc;

use tracing::{debug, error, info};

use streamwatch_common::models::Credential;
use streamwatch_common::traits::Clock;
use crate::platforms::twitch::auth::TokenSource;

/// Holds at most one credential. An absent or expired credential is replaced
/// on the next `get_valid_credential` call; nothing is persisted.
pub struct TokenCache {
    source: Arc<dyn TokenSource>,
    clock: Arc<dyn Clock>,
    credential: Option<Credential>,
}

impl TokenCache {
    pub fn new(source: Arc<dyn TokenSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            credential: None,
        }
    }

    /// Returns the cached credential while it is valid, otherwise runs one
    /// exchange. `None` means no credential could be obtained; the cache is
    /// left empty in that case.
    pub async fn get_valid_credential(&mut self) -> Option<Credential> {
        let now = self.clock.now();
        if let Some(cred) = &self.credential {
            if !cred.is_expired_at(now) {
                return Some(cred.clone());
            }
            debug!("Cached Twitch app token expired at {}; refreshing", cred.expires_at);
            self.credential = None;
        }

        match self.source.exchange().await {
            Ok(issued) => {
                let cred = Credential::issued(issued.access_token, now, issued.expires_in);
                info!("Obtained Twitch app token; expires at {}", cred.expires_at);
                self.credential = Some(cred.clone());
                Some(cred)
            }
            Err(e) => {
                error!("Twitch app token exchange failed: {e}");
                None
            }
        }
    }

    /// Drops the cached credential so the next call exchanges a new one.
    pub fn invalidate(&mut self) {
        if self.credential.take().is_some() {
            debug!("Invalidated cached Twitch app token");
        }
    }

    /// Peek without refreshing.
    pub fn cached(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
