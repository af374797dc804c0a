// File: src/services/mod.rs

pub mod live_notifier;
pub mod reply_rules;

pub use live_notifier::{LiveNotifier, LogNotifier};
pub use reply_rules::{IncomingMessage, ReplyAction, ReplyConfig};
