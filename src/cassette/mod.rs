//! Cassette format for recording and replaying registry sessions.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

use std::path::Path;

use crate::error::Error;
use format::Cassette;

/// Load a cassette file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<Cassette, Error> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    serde_yaml::from_str(&content)
        .map_err(|source| Error::Yaml { path: path.to_path_buf(), source })
}
