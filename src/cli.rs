//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `idreg`.
#[derive(Debug, Parser)]
#[command(name = "idreg", version, about = "Allocate and track unique integer identifiers")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute an operation script against a fresh registry.
    Run {
        /// Path to a YAML list of operations.
        script: PathBuf,
        /// Seed for reproducible allocation (falls back to `IDREG_SEED`).
        #[arg(long)]
        seed: Option<u64>,
        /// Write a session cassette here (falls back to `IDREG_RECORD`).
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Allocate ids from a fresh registry and print them.
    Allocate {
        /// Number of ids to allocate.
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Seed for reproducible allocation (falls back to `IDREG_SEED`).
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Re-execute a recorded session and report divergences.
    Replay {
        /// Path to a session cassette.
        cassette: PathBuf,
        /// Draw from a generator re-seeded with the recorded seed instead of
        /// the recorded draws.
        #[arg(long)]
        from_seed: bool,
    },
}
