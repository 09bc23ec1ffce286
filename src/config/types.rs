use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::{
    DEFAULT_COMPLETION_MARKER, DEFAULT_LOG_FILTER, MIN_POLL_INTERVAL_MS, MIN_REFRESH_INTERVAL_SECS,
    clamp_placeholder_percent, default_completion_marker, default_completion_notice_delay_ms,
    default_connect_timeout_secs, default_poll_interval_ms, default_read_timeout_secs,
    default_log_filter, default_max_log_files, default_refresh_interval_secs, default_server_url,
    default_start_placeholder_percent,
};

/// Dashboard settings persisted in `config.toml`.
///
/// Config keys (TOML): `server_url`, `training`, `chart`, `http`, `logging`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Base URL of the attendance server; endpoints are resolved against it.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub training: TrainingSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            training: TrainingSettings::default(),
            chart: ChartSettings::default(),
            http: HttpSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl DashboardSettings {
    /// Clamp values that would otherwise hammer the server or break the UI.
    pub fn normalized(mut self) -> Self {
        self.training.poll_interval_ms = self.training.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        self.training.start_placeholder_percent =
            clamp_placeholder_percent(self.training.start_placeholder_percent);
        if self.training.completion_marker.is_empty() {
            self.training.completion_marker = DEFAULT_COMPLETION_MARKER.to_string();
        }
        self.chart.refresh_interval_secs =
            self.chart.refresh_interval_secs.max(MIN_REFRESH_INTERVAL_SECS);
        self.http.connect_timeout_secs = self.http.connect_timeout_secs.max(1);
        self.http.read_timeout_secs = self.http.read_timeout_secs.max(1);
        if self.logging.filter.trim().is_empty() {
            self.logging.filter = DEFAULT_LOG_FILTER.to_string();
        }
        self.logging.max_files = self.logging.max_files.max(1);
        self
    }
}

/// Training loop timing and completion detection.
///
/// Config keys: `poll_interval_ms`, `completion_notice_delay_ms`,
/// `start_placeholder_percent`, `completion_marker`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Delay between loop termination and the completion notification.
    #[serde(default = "default_completion_notice_delay_ms")]
    pub completion_notice_delay_ms: u64,
    /// Progress shown as soon as the server accepts the start request.
    #[serde(default = "default_start_placeholder_percent")]
    pub start_placeholder_percent: u8,
    /// Case-sensitive substring that marks a status message as final.
    #[serde(default = "default_completion_marker")]
    pub completion_marker: String,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            completion_notice_delay_ms: default_completion_notice_delay_ms(),
            start_placeholder_percent: default_start_placeholder_percent(),
            completion_marker: default_completion_marker(),
        }
    }
}

impl TrainingSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn completion_notice_delay(&self) -> Duration {
        Duration::from_millis(self.completion_notice_delay_ms)
    }
}

/// Chart refresh cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl ChartSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Network timeouts for the shared HTTP agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

/// Log verbosity and retention.
///
/// Config keys: `filter` (an `EnvFilter` directive, overridden by `RUST_LOG`),
/// `max_files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log files kept in `logs/`, counting the one for the current launch.
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            max_files: default_max_log_files(),
        }
    }
}

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No suitable config directory available")]
    NoConfigDir,
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid server URL '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Server URL '{url}' must use http or https")]
    UnsupportedScheme { url: String },
}
