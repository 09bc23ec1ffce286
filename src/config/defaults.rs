pub(super) const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/";
pub(super) const DEFAULT_COMPLETION_MARKER: &str = "complete";
pub(super) const DEFAULT_LOG_FILTER: &str = "info";

pub(super) const MIN_POLL_INTERVAL_MS: u64 = 100;
pub(super) const MIN_REFRESH_INTERVAL_SECS: u64 = 1;

pub(super) fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

pub(super) fn default_poll_interval_ms() -> u64 {
    1_000
}

pub(super) fn default_completion_notice_delay_ms() -> u64 {
    500
}

pub(super) fn default_start_placeholder_percent() -> u8 {
    10
}

pub(super) fn default_completion_marker() -> String {
    DEFAULT_COMPLETION_MARKER.to_string()
}

pub(super) fn default_refresh_interval_secs() -> u64 {
    10
}

pub(super) fn default_connect_timeout_secs() -> u64 {
    10
}

pub(super) fn default_read_timeout_secs() -> u64 {
    30
}

pub(super) fn clamp_placeholder_percent(value: u8) -> u8 {
    value.clamp(1, 99)
}

pub(super) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

pub(super) fn default_max_log_files() -> usize {
    10
}
