// File: streamwatch-common/src/traits/mod.rs
pub mod clock;

pub use clock::{Clock, SystemClock};
