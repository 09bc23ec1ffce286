use std::path::{Path, PathBuf};

use url::Url;

use crate::app_dirs;

use super::types::{ConfigError, DashboardSettings};

/// Default filename used to store the dashboard configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides `server_url` from the config file.
pub const SERVER_URL_ENV: &str = "ATTENDANCE_DASHBOARD_SERVER_URL";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, writing defaults when the file is missing.
///
/// `ATTENDANCE_DASHBOARD_SERVER_URL` takes precedence over the stored server URL.
pub fn load_or_default() -> Result<DashboardSettings, ConfigError> {
    let path = config_path()?;
    let mut settings = if path.exists() {
        load_from(&path)?
    } else {
        let defaults = DashboardSettings::default();
        save_to_path(&defaults, &path)?;
        tracing::info!("Wrote default config to {}", path.display());
        defaults
    };
    if let Ok(url) = std::env::var(SERVER_URL_ENV)
        && !url.trim().is_empty()
    {
        settings.server_url = url.trim().to_string();
    }
    parse_server_url(&settings.server_url)?;
    Ok(settings)
}

/// Load settings from a specific TOML file.
pub fn load_from(path: &Path) -> Result<DashboardSettings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<DashboardSettings>(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
        .map(DashboardSettings::normalized)
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &DashboardSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the server base URL so endpoint paths can be joined onto it.
///
/// A missing trailing slash is added; otherwise `Url::join` would drop the
/// last path segment of the base.
pub fn parse_server_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidServerUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            url: trimmed.to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}
