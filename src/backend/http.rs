//! `ureq` client for the attendance server endpoints.

use std::io::Write;

use url::Url;

use super::{
    AttendanceStats, DashboardBackend, ExportError, PollError, StartError, StartOutcome,
    TrainingStatus,
};
use crate::config::{self, ConfigError, DashboardSettings, HttpSettings};
use crate::http_client;

const MAX_START_RESPONSE_BYTES: usize = 64 * 1024;
const MAX_STATUS_RESPONSE_BYTES: usize = 64 * 1024;
const MAX_STATS_RESPONSE_BYTES: usize = 1024 * 1024;
const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;
const MAX_CSV_BYTES: usize = 64 * 1024 * 1024;

/// Absolute URLs of every endpoint the dashboard consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub train_model: Url,
    pub train_status: Url,
    pub attendance_stats: Url,
    pub download_csv: Url,
}

impl Endpoints {
    /// Resolve endpoint paths against a base URL that ends with `/`.
    pub fn resolve(base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            train_model: base.join("train_model")?,
            train_status: base.join("train_status")?,
            attendance_stats: base.join("attendance_stats")?,
            download_csv: base.join("download_csv")?,
        })
    }
}

/// Talks to the attendance server over plain HTTP GETs.
pub struct HttpBackend {
    agent: ureq::Agent,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(base: &Url, http: &HttpSettings) -> Result<Self, url::ParseError> {
        Ok(Self {
            agent: http_client::build_agent(http),
            endpoints: Endpoints::resolve(base)?,
        })
    }

    /// Build a backend from loaded settings.
    pub fn from_settings(settings: &DashboardSettings) -> Result<Self, ConfigError> {
        let base = config::parse_server_url(&settings.server_url)?;
        Self::new(&base, &settings.http).map_err(|source| ConfigError::InvalidServerUrl {
            url: settings.server_url.clone(),
            source,
        })
    }

    fn get(&self, url: &Url) -> Result<ureq::Response, ureq::Error> {
        self.agent.get(url.as_str()).call()
    }

    fn get_text(&self, url: &Url, max_bytes: usize) -> Result<String, PollError> {
        let response = match self.agent.get(url.as_str()).set("Accept", "application/json").call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(PollError::Status {
                    code,
                    body: read_body_limited(response, MAX_ERROR_BODY_BYTES)
                        .unwrap_or_else(|err| err),
                });
            }
            Err(ureq::Error::Transport(err)) => return Err(PollError::Transport(err.to_string())),
        };
        let code = response.status();
        if !is_success(code) {
            return Err(PollError::Status {
                code,
                body: read_body_limited(response, MAX_ERROR_BODY_BYTES).unwrap_or_else(|err| err),
            });
        }
        read_body_limited(response, max_bytes).map_err(PollError::Transport)
    }
}

impl DashboardBackend for HttpBackend {
    fn start_training(&self) -> Result<StartOutcome, StartError> {
        let response = match self.get(&self.endpoints.train_model) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body =
                    read_body_limited(response, MAX_ERROR_BODY_BYTES).unwrap_or_else(|err| err);
                return Err(StartError::Rejected { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(StartError::Transport(err.to_string()));
            }
        };
        let code = response.status();
        if !is_success(code) {
            let body = read_body_limited(response, MAX_ERROR_BODY_BYTES).unwrap_or_else(|err| err);
            return Err(StartError::Rejected { code, body });
        }
        // The body only refines the outcome; an unreadable one is still a start.
        let body = read_body_limited(response, MAX_START_RESPONSE_BYTES).unwrap_or_default();
        Ok(StartOutcome::from_body(&body))
    }

    fn training_status(&self) -> Result<TrainingStatus, PollError> {
        let body = self.get_text(&self.endpoints.train_status, MAX_STATUS_RESPONSE_BYTES)?;
        TrainingStatus::parse(&body)
    }

    fn attendance_stats(&self) -> Result<AttendanceStats, PollError> {
        let body = self.get_text(&self.endpoints.attendance_stats, MAX_STATS_RESPONSE_BYTES)?;
        AttendanceStats::parse(&body)
    }

    fn download_attendance_csv(&self, writer: &mut dyn Write) -> Result<u64, ExportError> {
        let response = match self.get(&self.endpoints.download_csv) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body =
                    read_body_limited(response, MAX_ERROR_BODY_BYTES).unwrap_or_else(|err| err);
                return Err(ExportError::Status { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(ExportError::Transport(err.to_string()));
            }
        };
        let code = response.status();
        if !is_success(code) {
            let body = read_body_limited(response, MAX_ERROR_BODY_BYTES).unwrap_or_else(|err| err);
            return Err(ExportError::Status { code, body });
        }
        Ok(http_client::copy_response_to_writer(
            response,
            writer,
            MAX_CSV_BYTES,
        )?)
    }
}

/// Any 2xx counts as success; this includes `202 Accepted` from `/train_model`.
fn is_success(code: u16) -> bool {
    (200..300).contains(&code)
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    http_client::read_response_text(response, max_bytes).map_err(|err| err.to_string())
}
