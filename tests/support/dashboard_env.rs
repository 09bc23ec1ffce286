use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};

const CONFIG_HOME_VAR: &str = "ATTENDANCE_DASHBOARD_CONFIG_HOME";
const SERVER_URL_VAR: &str = "ATTENDANCE_DASHBOARD_SERVER_URL";

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the dashboard at a scratch config home and restores the previous
/// environment on drop.
pub struct DashboardEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl DashboardEnvGuard {
    /// Use `path` as the config home with no server URL override.
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let mut guard = Self {
            previous: Vec::new(),
            _lock: lock,
        };
        guard.replace(CONFIG_HOME_VAR, Some(path.to_string_lossy().into_owned()));
        guard.replace(SERVER_URL_VAR, None);
        guard
    }

    pub fn with_server_url(mut self, url: &str) -> Self {
        self.replace(SERVER_URL_VAR, Some(url.to_string()));
        self
    }

    fn replace(&mut self, name: &'static str, value: Option<String>) {
        self.previous.push((name, std::env::var(name).ok()));
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

impl Drop for DashboardEnvGuard {
    fn drop(&mut self) {
        while let Some((name, value)) = self.previous.pop() {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(name, value),
                    None => std::env::remove_var(name),
                }
            }
        }
    }
}
