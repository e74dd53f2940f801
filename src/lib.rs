//! Unique integer identifier registry.
//!
//! [`IdRegistry`] hands out `i32` ids drawn from its own pseudo-random
//! source, accepts caller-chosen ids, and guarantees no id is held twice.
//! The `idreg` binary drives a registry from operation scripts and can
//! record and replay whole sessions as cassettes.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod error;
pub mod ports;
pub mod registry;
pub mod script;

pub use error::{CapacityExhaustedError, DuplicateIdError, Error};
pub use registry::IdRegistry;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}
