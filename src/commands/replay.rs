//! `idreg replay` command.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{debug, warn};

use crate::adapters::live::SeededRandom;
use crate::adapters::replaying::{DrawStream, ReplayingRandom};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::REGISTRY_PORT;
use crate::ports::RandomSource;
use crate::registry::IdRegistry;
use crate::script::{self, Op, Outcome};

/// A recorded operation whose replayed outcome differs from the recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Divergence {
    /// Sequence number of the recorded operation.
    pub seq: u64,
    /// The operation.
    pub op: Op,
    /// Outcome as recorded.
    pub expected: Value,
    /// Outcome observed on replay.
    pub actual: Outcome,
}

/// Summary of a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    /// Number of operations re-executed.
    pub checked: usize,
    /// Operations whose outcome changed.
    pub divergences: Vec<Divergence>,
}

impl ReplayReport {
    /// Whether every operation reproduced its recorded outcome.
    #[must_use]
    pub fn is_faithful(&self) -> bool {
        self.divergences.is_empty()
    }
}

/// Execute the `replay` command.
///
/// # Errors
///
/// Returns an error string if the cassette cannot be loaded or replayed, or
/// if any operation diverges from its recording.
pub fn run(path: &Path, from_seed: bool) -> Result<(), String> {
    let cassette = crate::cassette::load(path).map_err(|e| e.to_string())?;
    let report = verify(&cassette, from_seed)?;

    for d in &report.divergences {
        let actual = json(&d.actual)?;
        println!("seq {}: {} recorded {} but replayed {actual}", d.seq, d.op.name(), d.expected);
    }
    if report.is_faithful() {
        println!("Replayed {} operation(s): all outcomes match.", report.checked);
        Ok(())
    } else {
        Err(format!(
            "{} of {} operation(s) diverged from {}",
            report.divergences.len(),
            report.checked,
            path.display()
        ))
    }
}

/// Re-execute the registry operations in `cassette` against a fresh registry.
///
/// Draws come from the recording, or from a generator re-seeded with the
/// recorded seed when `from_seed` is set.
///
/// # Errors
///
/// Returns an error string if `from_seed` is set on an unseeded recording, a
/// recorded operation cannot be decoded, or the recorded draws do not match
/// what the operations consume (missing, out of range, or left over).
pub fn verify(cassette: &Cassette, from_seed: bool) -> Result<ReplayReport, String> {
    let mut stream = None;
    let source: Box<dyn RandomSource> = if from_seed {
        let seed = cassette
            .seed
            .ok_or_else(|| format!("Cassette {:?} was recorded without a seed", cassette.name))?;
        Box::new(SeededRandom::seeded(seed))
    } else {
        let replaying = ReplayingRandom::new(CassetteReplayer::new(cassette));
        stream = Some(replaying.stream());
        Box::new(replaying)
    };
    let mut registry = IdRegistry::with_source(source);

    let mut report = ReplayReport::default();
    for interaction in cassette.port_interactions(REGISTRY_PORT) {
        let op: Op = serde_json::from_value(interaction.input.clone())
            .map_err(|e| format!("Undecodable operation at seq={}: {e}", interaction.seq))?;
        let actual = script::execute(&mut registry, &op);
        report.checked += 1;

        if let Some(fault) = stream.as_ref().and_then(|s| lock(s).take_fault()) {
            warn!(seq = interaction.seq, op = op.name(), %fault, "draw stream fault");
            return Err(format!(
                "{fault} while replaying {} at seq={}",
                op.name(),
                interaction.seq
            ));
        }

        if json(&actual)? == interaction.output {
            debug!(seq = interaction.seq, op = op.name(), "outcome reproduced");
        } else {
            warn!(seq = interaction.seq, op = op.name(), "outcome diverged");
            report.divergences.push(Divergence {
                seq: interaction.seq,
                op,
                expected: interaction.output.clone(),
                actual,
            });
        }
    }

    let unused = stream.as_ref().map_or(0, |s| lock(s).remaining());
    if unused > 0 {
        return Err(format!("{unused} recorded draw(s) were never consumed"));
    }
    Ok(report)
}

fn lock(stream: &Mutex<DrawStream>) -> MutexGuard<'_, DrawStream> {
    stream.lock().unwrap_or_else(PoisonError::into_inner)
}

fn json(outcome: &Outcome) -> Result<Value, String> {
    serde_json::to_value(outcome).map_err(|e| e.to_string())
}
