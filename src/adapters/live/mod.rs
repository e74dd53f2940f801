//! Live adapters backed by real randomness.

pub mod random;

pub use random::SeededRandom;
