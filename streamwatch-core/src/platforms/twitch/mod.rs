// File: src/platforms/twitch/mod.rs

pub mod auth;
pub mod client;
pub mod requests;
pub mod token_cache;

pub use auth::{ClientCredentialsAuthenticator, IssuedToken, TokenSource};
pub use client::TwitchHelixClient;
pub use token_cache::TokenCache;
