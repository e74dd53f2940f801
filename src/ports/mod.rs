//! Port traits defining external boundaries.
//!
//! The registry's only external dependency is its source of randomness.
//! Implementations live in `src/adapters/`.

pub mod random;

pub use random::RandomSource;
