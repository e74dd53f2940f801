//! `idreg allocate` command.

use crate::error::Error;
use crate::registry::IdRegistry;

/// Execute the `allocate` command, printing one id per line.
///
/// # Errors
///
/// Returns an error string if the id space is exhausted.
pub fn run(count: usize, seed: Option<u64>) -> Result<(), String> {
    let mut registry = IdRegistry::new(seed);
    for id in allocate(&mut registry, count).map_err(|e| e.to_string())? {
        println!("{id}");
    }
    Ok(())
}

/// Allocate `count` ids from `registry`.
///
/// # Errors
///
/// Returns [`Error::CapacityExhausted`] if the id space fills up first.
pub fn allocate(registry: &mut IdRegistry, count: usize) -> Result<Vec<i32>, Error> {
    let mut ids = Vec::new();
    for _ in 0..count {
        ids.push(registry.allocate()?);
    }
    Ok(ids)
}
