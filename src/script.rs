//! Operation scripts: a YAML list of registry calls and their outcomes.
//!
//! ```yaml
//! - op: register
//!   id: 5
//! - op: allocate_many
//!   count: 3
//! - op: release
//!   id: 5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::registry::IdRegistry;

/// One call against a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Generate a fresh id.
    Allocate,
    /// Generate `count` fresh ids, stopping early on exhaustion.
    AllocateMany {
        /// How many ids to request.
        count: usize,
    },
    /// Register a caller-chosen id, reporting duplicates as failures.
    Register {
        /// The id to register.
        id: i32,
    },
    /// Register a caller-chosen id, reporting only success or failure.
    TryRegister {
        /// The id to register.
        id: i32,
    },
    /// Check whether an id is allocated.
    Exists {
        /// The id to look up.
        id: i32,
    },
    /// Release an id.
    Release {
        /// The id to release.
        id: i32,
    },
    /// List every allocated id.
    Snapshot,
}

impl Op {
    /// Method name used when recording this op.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Allocate => "allocate",
            Self::AllocateMany { .. } => "allocate_many",
            Self::Register { .. } => "register",
            Self::TryRegister { .. } => "try_register",
            Self::Exists { .. } => "exists",
            Self::Release { .. } => "release",
            Self::Snapshot => "snapshot",
        }
    }
}

/// Result of executing one [`Op`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// A fresh id was allocated.
    Allocated {
        /// The new id.
        id: i32,
    },
    /// A batch allocation finished.
    AllocatedMany {
        /// Ids allocated, in order.
        ids: Vec<i32>,
        /// Whether the batch stopped short because the id space filled up.
        exhausted: bool,
    },
    /// A manual registration succeeded.
    Registered {
        /// The registered id.
        id: i32,
    },
    /// A manual registration hit an id already in use.
    Duplicate {
        /// The rejected id.
        id: i32,
    },
    /// Allocation failed because the id space is full.
    Exhausted {
        /// Ids held at the time of failure.
        allocated: usize,
    },
    /// Result of a boolean-style registration.
    Attempted {
        /// The id attempted.
        id: i32,
        /// Whether it was registered.
        accepted: bool,
    },
    /// Result of a lookup.
    Checked {
        /// The id looked up.
        id: i32,
        /// Whether it is allocated.
        present: bool,
    },
    /// Result of a release.
    Released {
        /// The id released.
        id: i32,
        /// Whether it had been allocated.
        removed: bool,
    },
    /// Every allocated id, in insertion order.
    Snapshot {
        /// The ids.
        ids: Vec<i32>,
    },
}

/// Apply `op` to `registry`.
pub fn execute(registry: &mut IdRegistry, op: &Op) -> Outcome {
    match *op {
        Op::Allocate => match registry.allocate() {
            Ok(id) => Outcome::Allocated { id },
            Err(e) => Outcome::Exhausted { allocated: e.allocated },
        },
        Op::AllocateMany { count } => {
            let mut ids = Vec::new();
            let mut exhausted = false;
            for _ in 0..count {
                if let Ok(id) = registry.allocate() {
                    ids.push(id);
                } else {
                    exhausted = true;
                    break;
                }
            }
            Outcome::AllocatedMany { ids, exhausted }
        }
        Op::Register { id } => match registry.register(id) {
            Ok(id) => Outcome::Registered { id },
            Err(e) => Outcome::Duplicate { id: e.id },
        },
        Op::TryRegister { id } => {
            Outcome::Attempted { id, accepted: registry.register_succeeds(id) }
        }
        Op::Exists { id } => Outcome::Checked { id, present: registry.exists(id) },
        Op::Release { id } => Outcome::Released { id, removed: registry.release(id) },
        Op::Snapshot => Outcome::Snapshot { ids: registry.ids() },
    }
}

/// Parse a script from YAML text.
///
/// # Errors
///
/// Returns an error if the text is not a YAML list of ops.
pub fn parse(yaml: &str) -> Result<Vec<Op>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a list of ops.
pub fn load(path: &Path) -> Result<Vec<Op>, Error> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    parse(&content).map_err(|source| Error::Yaml { path: path.to_path_buf(), source })
}
