use std::collections::{HashMap, HashSet};

use streamwatch_common::models::StreamRecord;

/// Which watched streamers are currently believed to be live, and what we
/// saw when they went live.
///
/// The id set and the record map always hold the same keys. Single owner,
/// no internal locking.
#[derive(Debug, Default)]
pub struct LiveStateStore {
    live: HashSet<String>,
    records: HashMap<String, StreamRecord>,
}

impl LiveStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self, streamer_id: &str) -> bool {
        self.live.contains(streamer_id)
    }

    pub fn get(&self, streamer_id: &str) -> Option<&StreamRecord> {
        self.records.get(streamer_id)
    }

    /// Inserts or replaces the record for `streamer_id`.
    pub fn mark_live(&mut self, streamer_id: &str, record: StreamRecord) {
        self.live.insert(streamer_id.to_string());
        self.records.insert(streamer_id.to_string(), record);
    }

    /// Removes the streamer, returning the record it had if any.
    pub fn mark_offline(&mut self, streamer_id: &str) -> Option<StreamRecord> {
        self.live.remove(streamer_id);
        self.records.remove(streamer_id)
    }

    pub fn live_ids(&self) -> impl Iterator<Item = &str> {
        self.live.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
