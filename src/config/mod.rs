//! Dashboard configuration stored as TOML under the app directory.

mod defaults;
mod io;
mod types;

pub use io::{
    CONFIG_FILE_NAME, SERVER_URL_ENV, config_path, load_from, load_or_default, parse_server_url,
    save_to_path,
};
pub use types::{
    ChartSettings, ConfigError, DashboardSettings, HttpSettings, LoggingSettings, TrainingSettings,
};
