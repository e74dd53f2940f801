//! Adapter implementations of the port traits.
//!
//! - `live`: real pseudo-random number generation.
//! - `recording`: wraps another adapter and writes every call to a cassette.
//! - `replaying`: serves calls back from a previously recorded cassette.

pub mod live;
pub mod recording;
pub mod replaying;
