//! Process-wide logging to the console and a log file

use std::{
    fs::{File, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "email_log.txt";

/// Install the global subscriber. Call once, before any other component logs.
///
/// Events go to stdout and are appended, without ANSI colours, to `log_file`.
/// `RUST_LOG` overrides the default `info` level.
#[mutants::skip]
pub fn init(log_file: &Path) -> Result<()> {
    let file = open_log_file(log_file)?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
        .context("invalid RUST_LOG directive")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("logging was already initialized")?;

    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_log_file_is_appended() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("email_log.txt");

        writeln!(open_log_file(&path)?, "first")?;
        writeln!(open_log_file(&path)?, "second")?;

        assert_eq!(std::fs::read_to_string(&path)?, "first\nsecond\n");

        Ok(())
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() -> TestResult {
        let dir = tempdir()?;

        let result = open_log_file(&dir.path().join("missing").join("email_log.txt"));

        assert!(result.is_err());

        Ok(())
    }
}
