//! Tracing setup: console output plus one log file per launch under `logs/`.
//!
//! Verbosity and retention come from the `[logging]` config section; `RUST_LOG`
//! still wins when set.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app_dirs;
use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "attendance_dashboard";
const LOG_FILE_EXTENSION: &str = "log";
const FALLBACK_FILTER: &str = "info";

const FILE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static FILE_WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    Dir(#[from] app_dirs::AppDirError),
    #[error("Failed to open log file {path}: {source}")]
    OpenFile { path: PathBuf, source: io::Error },
    #[error("Failed to prune old logs in {path}: {source}")]
    Prune { path: PathBuf, source: io::Error },
    #[error("Failed to format log file timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber and return this launch's log file.
///
/// Only the first call installs anything; later calls return `Ok(None)`.
pub fn init(settings: &LoggingSettings) -> Result<Option<PathBuf>, LoggingError> {
    if FILE_WRITER_GUARD.get().is_some() {
        return Ok(None);
    }
    let started = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let (log_path, file) = open_launch_log(&app_dirs::logs_dir()?, settings.max_files, started)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let timer = fmt::time::OffsetTime::new(started.offset(), LINE_STAMP);
    let env_override = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(filter_for(settings, env_override.as_deref()))
        .with(fmt::layer().with_timer(timer.clone()))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        )
        .try_init()?;
    let _ = FILE_WRITER_GUARD.set(guard);

    tracing::info!(
        path = %log_path.display(),
        filter = %settings.filter,
        "Logging initialized"
    );
    Ok(Some(log_path))
}

/// An unparsable directive falls back to `info` rather than silencing output.
fn filter_for(settings: &LoggingSettings, env_override: Option<&str>) -> EnvFilter {
    let directive = env_override
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(settings.filter.as_str());
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("Ignoring log filter {directive:?}: {err}");
        EnvFilter::new(FALLBACK_FILTER)
    })
}

/// Create the log file for a launch started at `started`, then prune `dir`
/// down to `keep` launch logs including the new one.
fn open_launch_log(
    dir: &Path,
    keep: usize,
    started: OffsetDateTime,
) -> Result<(PathBuf, fs::File), LoggingError> {
    let path = dir.join(log_file_name(started)?);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.clone(),
            source,
        })?;
    prune_launch_logs(dir, keep.max(1)).map_err(|source| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok((path, file))
}

fn log_file_name(started: OffsetDateTime) -> Result<String, time::error::Format> {
    let stamp = started.format(FILE_STAMP)?;
    Ok(format!("{LOG_FILE_PREFIX}_{stamp}.{LOG_FILE_EXTENSION}"))
}

/// Launch logs sort chronologically by name. Other files in `dir` are left alone.
fn prune_launch_logs(dir: &Path, keep: usize) -> io::Result<usize> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_launch_log(&path) {
            logs.push(path);
        }
    }
    logs.sort();
    let excess = logs.len().saturating_sub(keep);
    for path in &logs[..excess] {
        fs::remove_file(path)?;
    }
    Ok(excess)
}

fn is_launch_log(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == LOG_FILE_EXTENSION)
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.starts_with(LOG_FILE_PREFIX))
}
