//! The identifier registry: allocation, registration, lookup and release of
//! unique `i32` ids.
//!
//! A registry owns its set of ids in use and its own random source. It does
//! no locking; callers sharing one across threads serialize access
//! themselves (e.g. behind a `Mutex`).

use std::fmt;

use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::adapters::live::SeededRandom;
use crate::error::{CapacityExhaustedError, DuplicateIdError};
use crate::ports::RandomSource;

/// Number of distinct values in `[0, i32::MAX]`.
pub const CAPACITY: u64 = i32::MAX as u64 + 1;

/// Exclusive upper bound of allocation draws. `i32::MAX` itself is only
/// reachable through [`IdRegistry::register`].
pub const DRAW_UPPER: i32 = i32::MAX;

const DRAW_RANGE: u64 = DRAW_UPPER as u64;

/// Tracks the ids currently in use and hands out fresh ones.
pub struct IdRegistry {
    allocated: IndexSet<i32>,
    /// Allocated ids falling inside `[0, DRAW_UPPER)`.
    drawable_used: u64,
    /// Always `CAPACITY` outside tests.
    capacity: u64,
    source: Box<dyn RandomSource>,
}

impl IdRegistry {
    /// Creates an empty registry, seeded when `seed` is given.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_source(Box::new(SeededRandom::new(seed)))
    }

    /// Creates an empty registry whose allocations are reproducible for `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Creates an empty registry seeded from OS entropy.
    #[must_use]
    pub fn unseeded() -> Self {
        Self::new(None)
    }

    /// Creates an empty registry drawing candidates from `source`.
    #[must_use]
    pub fn with_source(source: Box<dyn RandomSource>) -> Self {
        Self { allocated: IndexSet::new(), drawable_used: 0, capacity: CAPACITY, source }
    }

    /// Lowers the capacity so exhaustion can be reached in tests.
    #[cfg(test)]
    pub(crate) fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether `id` is currently allocated.
    #[must_use]
    pub fn exists(&self, id: i32) -> bool {
        self.allocated.contains(&id)
    }

    /// Adds a caller-chosen `id`.
    ///
    /// Any `i32` is accepted, including negatives and `i32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateIdError`] and leaves the registry unchanged when
    /// `id` is already allocated.
    pub fn register(&mut self, id: i32) -> Result<i32, DuplicateIdError> {
        if !self.insert(id) {
            debug!(id, "registration rejected: duplicate");
            return Err(DuplicateIdError { id });
        }
        debug!(id, "registered id");
        Ok(id)
    }

    /// Like [`register`](Self::register), collapsing the outcome to a flag.
    pub fn register_succeeds(&mut self, id: i32) -> bool {
        self.register(id).is_ok()
    }

    /// Generates, records and returns a fresh id in `[0, DRAW_UPPER)`.
    ///
    /// Candidates are drawn until one is free. Every draw, rejected or not,
    /// advances the random source.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExhaustedError`] and leaves the registry unchanged
    /// when `CAPACITY` ids are held or every drawable value is taken.
    pub fn allocate(&mut self) -> Result<i32, CapacityExhaustedError> {
        let held = self.allocated.len();
        if held as u64 >= self.capacity || self.drawable_used >= DRAW_RANGE {
            warn!(held, "id space exhausted");
            return Err(CapacityExhaustedError { allocated: held });
        }

        let mut collisions: u64 = 0;
        let id = loop {
            let candidate = self.source.draw(DRAW_UPPER);
            if self.insert(candidate) {
                break candidate;
            }
            collisions += 1;
            trace!(candidate, "collision");
        };
        debug!(id, collisions, "allocated id");
        Ok(id)
    }

    /// Removes `id`, returning whether it was present.
    pub fn release(&mut self, id: i32) -> bool {
        if !self.allocated.shift_remove(&id) {
            return false;
        }
        if is_drawable(id) {
            self.drawable_used -= 1;
        }
        debug!(id, "released id");
        true
    }

    /// Owned copy of the allocated ids, in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<i32> {
        self.allocated.iter().copied().collect()
    }

    /// Iterates over the allocated ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.allocated.iter().copied()
    }

    /// Number of allocated ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allocated.len()
    }

    /// Whether no id is allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocated.is_empty()
    }

    fn insert(&mut self, id: i32) -> bool {
        if !self.allocated.insert(id) {
            return false;
        }
        if is_drawable(id) {
            self.drawable_used += 1;
        }
        true
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::unseeded()
    }
}

impl fmt::Debug for IdRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdRegistry")
            .field("len", &self.allocated.len())
            .field("drawable_used", &self.drawable_used)
            .finish_non_exhaustive()
    }
}

fn is_drawable(id: i32) -> bool {
    (0..DRAW_UPPER).contains(&id)
}
