// File: src/platforms/discord/mod.rs

pub mod live_embed;
pub mod runtime;

pub use live_embed::DiscordLiveNotifier;
pub use runtime::DiscordPlatform;
