// File: src/tasks/mod.rs

pub mod stream_watch;

pub use stream_watch::{spawn_stream_watch_task, PollerContext, StreamWatcher};
