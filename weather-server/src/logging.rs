//! Process-wide tracing setup with an explicit init / teardown lifecycle.
//!
//! Events always go to stderr. When `[log].file` is set they are also written,
//! without colours, to a daily-rotated file through a background writer.

use anyhow::{Context, Result, anyhow};
use std::{fmt, path::Path};
use tracing::Subscriber;
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::LogConfig;

/// Returned by [`init`]; hold it for as long as the process should log.
#[must_use = "dropping the guard ends the logging lifecycle"]
pub struct LogGuard {
    file: Option<WorkerGuard>,
}

impl LogGuard {
    /// Flush pending file output and stop the background writer.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl fmt::Debug for LogGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogGuard").field("file", &self.file.is_some()).finish()
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        tracing::info!("Logging shut down");
        // The worker flushes its queue when its guard goes away.
        self.file.take();
    }
}

/// Install the global subscriber. Fails if the filter is invalid, the log
/// file cannot be opened, or a subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<LogGuard> {
    let (subscriber, guard) = build_subscriber(config)?;

    subscriber.try_init().context("A global logger is already installed")?;

    tracing::debug!(filter = %config.filter, file = ?config.file, "Logging initialised");
    Ok(guard)
}

fn build_subscriber(config: &LogConfig) -> Result<(impl Subscriber + Send + Sync + 'static, LogGuard)> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("Invalid log filter: {}", config.filter))?;

    let (file_layer, file_guard) = match file_writer(config)? {
        Some((writer, guard)) => (
            Some(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer);

    Ok((subscriber, LogGuard { file: file_guard }))
}

fn file_writer(config: &LogConfig) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    let Some(path) = config.file.as_deref() else {
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Log file path has no file name: {}", path.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(config.max_files.max(1))
        .build(dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))?;

    Ok(Some(tracing_appender::non_blocking(appender)))
}
