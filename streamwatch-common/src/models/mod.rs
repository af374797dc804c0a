// File: streamwatch-common/src/models/mod.rs
pub mod credential;
pub mod stream;
pub mod event;

pub use credential::Credential;
pub use stream::StreamRecord;
pub use event::LiveEvent;
