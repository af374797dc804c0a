// File: src/cache/mod.rs

pub mod live_state;

pub use live_state::LiveStateStore;
