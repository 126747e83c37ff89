//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so interactive sessions log to a daily rolling
//! file under `${PLAZA_HOME}/logs`. Headless commands log to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, paths};

/// File name prefix for rolling log files.
const LOG_FILE_PREFIX: &str = "plaza.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Rolling file in the logs directory (or nowhere if disabled in config).
    File,
    /// Standard error.
    Stderr,
}

/// Installs the global tracing subscriber.
///
/// Returns the appender guard when logging to a file; keep it alive for the
/// duration of the program so buffered lines get flushed.
pub fn init(config: &Config, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(&config.log_filter());

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            Ok(None)
        }
        LogTarget::File if !config.log.file => Ok(None),
        LogTarget::File => init_file(&paths::logs_dir(), filter).map(Some),
    }
}

fn init_file(dir: &Path, filter: EnvFilter) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}

/// Parses a filter directive, falling back to `info` on invalid input.
fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}
