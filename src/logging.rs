//! Tracing setup.
//!
//! The filter comes from `KATFEMTECH_LOG` (same syntax as `RUST_LOG`) and
//! falls back to `[logging].level`. The terminal UI owns the screen, so it
//! logs to a daily rolling file; the other commands log to stderr.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingSettings;

pub const LOG_ENV: &str = "KATFEMTECH_LOG";
const LOG_FILE: &str = "katfemtech.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    Stderr,
    File,
}

/// Installs the global subscriber. Keep the returned guard alive for the rest
/// of the process or buffered file output is lost.
pub fn init(settings: &LoggingSettings, sink: Sink) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(settings)?;

    match sink {
        Sink::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stderr))
                .try_init()?;
            Ok(None)
        }
        Sink::File if !settings.file => Ok(None),
        Sink::File => {
            let dir = log_dir(settings).context("no log directory available")?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
    }
}

fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.level)
            .with_context(|| format!("invalid logging.level `{}`", settings.level)),
    }
}

/// `[logging].directory` with `~` expanded, or the platform cache directory.
pub fn log_dir(settings: &LoggingSettings) -> Option<PathBuf> {
    match &settings.directory {
        Some(dir) => Some(PathBuf::from(shellexpand::tilde(dir).into_owned())),
        None => dirs::cache_dir().map(|dir| dir.join("katfemtech")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(directory: Option<&str>) -> LoggingSettings {
        LoggingSettings {
            level: "debug".into(),
            file: true,
            directory: directory.map(str::to_string),
        }
    }

    #[test]
    fn explicit_directory_expands_home() {
        let dir = log_dir(&settings(Some("~/logs/kft"))).unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(dir, home.join("logs/kft"));
        }
        assert!(dir.ends_with("logs/kft"));
    }

    #[test]
    fn default_directory_lives_under_cache() {
        if let Some(cache) = dirs::cache_dir() {
            assert_eq!(log_dir(&settings(None)), Some(cache.join("katfemtech")));
        }
    }

    #[test]
    fn bad_level_is_reported() {
        let mut bad = settings(None);
        bad.level = "katfemtech=loudest".into();
        if std::env::var_os(LOG_ENV).is_none() {
            assert!(build_filter(&bad).is_err());
        }
    }
}
