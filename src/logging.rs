//! Tracing subscriber setup.
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `hn_front=warn`).
//! `hnf browse` owns the terminal, so it logs to a file in the temp
//! directory instead, and only when `RUST_LOG` is set.

use anyhow::{anyhow, Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "hn_front=warn";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to, without ANSI colours.
    File(PathBuf),
}

/// Install the global subscriber. Fails if one is already installed or the
/// log file cannot be opened.
pub fn init(target: LogTarget) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => builder
            .with_writer(Mutex::new(open_log_file(&path)?))
            .with_ansi(false)
            .try_init(),
    }
    .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Log file used by `hnf browse`.
pub fn browse_log_path() -> PathBuf {
    std::env::temp_dir().join("hnf-browse.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn log_file_is_created_then_appended() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("hnf.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn unopenable_log_file_names_the_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("hnf.log");

        let err = open_log_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("missing"));
    }

    #[test]
    fn browse_log_lives_in_temp_dir() {
        let path = browse_log_path();
        assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
        assert!(path.ends_with("hnf-browse.log"));
    }
}
