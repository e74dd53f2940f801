//! `idreg run` command.

use std::path::Path;

use tracing::info;

use crate::adapters::live::SeededRandom;
use crate::cassette::session::RecordingSession;
use crate::registry::IdRegistry;
use crate::script::{self, Op, Outcome};

/// Execute the `run` command.
///
/// Prints one JSON line per operation outcome. When `record` is set, the
/// session's draws and operations are written to a cassette there.
///
/// # Errors
///
/// Returns an error string if the script cannot be loaded or the cassette
/// cannot be written.
pub fn run(script_path: &Path, seed: Option<u64>, record: Option<&Path>) -> Result<(), String> {
    let ops = script::load(script_path).map_err(|e| e.to_string())?;
    let outcomes = execute_all(&ops, seed, record)?;
    for outcome in &outcomes {
        let line = serde_json::to_string(outcome).map_err(|e| e.to_string())?;
        println!("{line}");
    }
    Ok(())
}

/// Run `ops` against a fresh registry, optionally recording the session.
///
/// # Errors
///
/// Returns an error string if the cassette cannot be written.
pub fn execute_all(
    ops: &[Op],
    seed: Option<u64>,
    record: Option<&Path>,
) -> Result<Vec<Outcome>, String> {
    let session = record.map(|path| RecordingSession::new(path, seed));
    let source = Box::new(SeededRandom::new(seed));

    let mut registry = match &session {
        Some(session) => IdRegistry::with_source(session.wrap(source)),
        None => IdRegistry::with_source(source),
    };

    let mut outcomes = Vec::with_capacity(ops.len());
    for op in ops {
        let outcome = script::execute(&mut registry, op);
        if let Some(session) = &session {
            session.record_op(op.name(), op, &outcome);
        }
        outcomes.push(outcome);
    }
    info!(ops = ops.len(), held = registry.len(), "script finished");

    // Drop the registry first to release the recording source.
    drop(registry);
    if let Some(session) = session {
        let path = session.finish()?;
        eprintln!("Recording saved to: {}", path.display());
    }

    Ok(outcomes)
}
