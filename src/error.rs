//! Error types for registry operations and the script and cassette files around them.

use std::path::PathBuf;

use thiserror::Error;

/// Returned by [`IdRegistry::register`](crate::registry::IdRegistry::register)
/// when the requested id is already allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("id {id} is already in use")]
pub struct DuplicateIdError {
    /// The id that was rejected.
    pub id: i32,
}

/// Returned by [`IdRegistry::allocate`](crate::registry::IdRegistry::allocate)
/// when no further id can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("all possible id values are in use ({allocated} allocated)")]
pub struct CapacityExhaustedError {
    /// Number of ids held by the registry when allocation failed.
    pub allocated: usize,
}

/// Umbrella error for allocation batches, scripts and cassettes.
#[derive(Debug, Error)]
pub enum Error {
    /// The id space is fully occupied.
    #[error(transparent)]
    CapacityExhausted(#[from] CapacityExhaustedError),
    /// A file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A YAML document could not be parsed or produced.
    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        /// Path of the document involved.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_yaml::Error,
    },
}
