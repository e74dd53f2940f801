//! Recording session capturing one registry's draws and operations.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;

use super::recorder::CassetteRecorder;
use crate::adapters::recording::{record_interaction, RecordingRandom};
use crate::ports::RandomSource;

/// Port name under which registry operations are recorded.
pub const REGISTRY_PORT: &str = "registry";

/// Shares one `CassetteRecorder` between the recording random source and
/// the operation log so both land in a single cassette in call order.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
    path: PathBuf,
}

impl RecordingSession {
    /// Start a session that will write its cassette to `path`.
    #[must_use]
    pub fn new(path: &Path, seed: Option<u64>) -> Self {
        let name = format!("idreg-{}", Utc::now().format("%Y-%m-%dT%H-%M-%S"));
        Self {
            recorder: Arc::new(Mutex::new(CassetteRecorder::new(path, name, seed))),
            path: path.to_path_buf(),
        }
    }

    /// Wrap `source` so that every draw it serves is recorded.
    #[must_use]
    pub fn wrap(&self, source: Box<dyn RandomSource>) -> Box<dyn RandomSource> {
        Box::new(RecordingRandom::new(source, Arc::clone(&self.recorder)))
    }

    /// Record one registry operation and its outcome.
    pub fn record_op<I: Serialize, O: Serialize>(&self, method: &str, input: &I, output: &O) {
        record_interaction(&self.recorder, REGISTRY_PORT, method, input, output);
    }

    /// Write the cassette to disk.
    ///
    /// Every source returned by [`wrap`](Self::wrap) must have been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a wrapped source is still alive or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording random source still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder
            .finish()
            .map_err(|e| format!("Failed to write cassette {}: {e}", self.path.display()))
    }
}
