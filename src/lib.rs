//! Library exports for the dashboard binary and integration tests.
/// Per-user application directories.
pub mod app_dirs;
/// Attendance server endpoints and payload types.
pub mod backend;
/// Persisted settings.
pub mod config;
/// Controller, UI state and egui renderer.
pub mod dashboard;
pub(crate) mod http_client;
/// Tracing subscriber setup.
pub mod logging;
