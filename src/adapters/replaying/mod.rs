//! Replaying adapters that replay recorded interactions.

pub mod random;

pub use random::{DrawStream, ReplayingRandom};
