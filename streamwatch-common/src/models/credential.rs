use chrono::{DateTime, Duration, Utc};

/// An app access token issued by a client-credentials exchange.
///
/// Lives only in memory. A credential is unusable once `now >= expires_at`
/// or after any request made with it has failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Builds a credential that expires `ttl_secs` after `issued_at`.
    pub fn issued(token: String, issued_at: DateTime<Utc>, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        let expires_at = issued_at
            .checked_add_signed(Duration::seconds(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { token, expires_at }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
