//! Command dispatch and handlers.

pub mod allocate;
pub mod replay;
pub mod run;

use std::env;
use std::path::PathBuf;

use crate::cli::Command;

/// Environment variable holding the default seed.
pub const SEED_ENV: &str = "IDREG_SEED";
/// Environment variable holding the default cassette path for `run`.
pub const RECORD_ENV: &str = "IDREG_RECORD";

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Run { script, seed, record } => {
            let seed = resolve_seed(*seed, env::var(SEED_ENV).ok())?;
            let record = record.clone().or_else(|| env::var_os(RECORD_ENV).map(PathBuf::from));
            run::run(script, seed, record.as_deref())
        }
        Command::Allocate { count, seed } => {
            let seed = resolve_seed(*seed, env::var(SEED_ENV).ok())?;
            allocate::run(*count, seed)
        }
        Command::Replay { cassette, from_seed } => replay::run(cassette, *from_seed),
    }
}

/// Pick the seed from the flag, falling back to the environment value.
fn resolve_seed(flag: Option<u64>, env_value: Option<String>) -> Result<Option<u64>, String> {
    if flag.is_some() {
        return Ok(flag);
    }
    match env_value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| format!("Invalid {SEED_ENV} value {raw:?}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_environment() {
        assert_eq!(resolve_seed(Some(1), Some("2".into())), Ok(Some(1)));
    }

    #[test]
    fn environment_fills_missing_flag() {
        assert_eq!(resolve_seed(None, Some(" 77 ".into())), Ok(Some(77)));
        assert_eq!(resolve_seed(None, Some(String::new())), Ok(None));
        assert_eq!(resolve_seed(None, None), Ok(None));
    }

    #[test]
    fn malformed_environment_seed_is_an_error() {
        let err = resolve_seed(None, Some("abc".into())).unwrap_err();
        assert!(err.contains(SEED_ENV));
    }
}
