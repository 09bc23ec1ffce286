mod support;

use std::sync::Arc;
use std::time::{Duration, Instant};

use attendance_dashboard::backend::HttpBackend;
use attendance_dashboard::config::DashboardSettings;
use attendance_dashboard::dashboard::DashboardController;
use attendance_dashboard::dashboard::state::NoticeTone;
use support::mock_server::MockServer;

const JOB_TIMEOUT: Duration = Duration::from_secs(10);
const SECOND: Duration = Duration::from_secs(1);

fn controller_for(server: &MockServer) -> DashboardController {
    let settings = DashboardSettings {
        server_url: server.base_url(),
        ..Default::default()
    };
    let backend = HttpBackend::from_settings(&settings).expect("backend");
    DashboardController::new(settings, Arc::new(backend))
}

fn tick_and_settle(controller: &mut DashboardController, now: Instant) {
    controller.tick(now);
    assert!(controller.wait_for_jobs(now, JOB_TIMEOUT));
}

#[test]
fn training_run_completes_against_server() {
    let server = MockServer::start();
    server.enqueue_json("/train_model", 202, r#"{"status":"started"}"#);
    server.enqueue_json(
        "/train_status",
        200,
        r#"{"running":true,"progress":10,"message":"Loading data"}"#,
    );
    server.enqueue_json(
        "/train_status",
        200,
        r#"{"running":true,"progress":55,"message":"Training model"}"#,
    );
    server.enqueue_json(
        "/train_status",
        200,
        r#"{"running":false,"progress":100,"message":"Training complete"}"#,
    );
    server.enqueue_json(
        "/attendance_stats",
        200,
        r#"{"dates":["01-Jan","02-Jan"],"counts":[4,6]}"#,
    );
    let mut controller = controller_for(&server);
    let t0 = Instant::now();

    tick_and_settle(&mut controller, t0);
    controller.request_training();
    assert!(!controller.ui.training.trigger_enabled);
    assert!(controller.wait_for_jobs(t0, JOB_TIMEOUT));
    assert_eq!(controller.ui.training.message, "Training started...");
    assert_eq!(controller.ui.training.progress.label(), "10%");

    tick_and_settle(&mut controller, t0 + SECOND);
    assert_eq!(controller.ui.training.message, "Loading data");
    tick_and_settle(&mut controller, t0 + 2 * SECOND);
    assert_eq!(controller.ui.training.progress.label(), "55%");
    tick_and_settle(&mut controller, t0 + 3 * SECOND);

    assert!(controller.training_phase().is_idle());
    assert!(controller.ui.training.trigger_enabled);
    assert_eq!(controller.ui.training.progress.label(), "100%");
    assert!(controller.ui.notifications.is_empty());

    tick_and_settle(&mut controller, t0 + 4 * SECOND);
    assert_eq!(controller.ui.notifications.len(), 1);
    assert_eq!(
        controller.ui.notifications.front().map(|notice| notice.tone),
        Some(NoticeTone::Success)
    );
    assert_eq!(server.hits("/train_model"), 1);
    assert_eq!(server.hits("/train_status"), 3);

    let chart = controller.chart().expect("chart");
    assert_eq!(chart.labels(), ["01-Jan", "02-Jan"]);
    assert_eq!(chart.values(), [4, 6]);
}

#[test]
fn server_error_on_start_surfaces_notification() {
    let server = MockServer::start();
    server.enqueue("/train_model", 500, "text/plain", "Internal Server Error");
    let mut controller = controller_for(&server);
    let t0 = Instant::now();

    controller.request_training();
    assert!(controller.wait_for_jobs(t0, JOB_TIMEOUT));

    assert!(controller.training_phase().is_idle());
    assert!(controller.ui.training.trigger_enabled);
    let notice = controller.ui.notifications.front().expect("notice");
    assert_eq!(notice.tone, NoticeTone::Error);
    assert_eq!(notice.text, "Failed to start training");

    tick_and_settle(&mut controller, t0 + 3 * SECOND);
    assert_eq!(server.hits("/train_status"), 0);
}

#[test]
fn malformed_stats_are_skipped_until_valid_payload_arrives() {
    let server = MockServer::start();
    server.enqueue_json("/attendance_stats", 200, r#"{"dates":["01-Jan"],"counts":[]}"#);
    server.enqueue_json("/attendance_stats", 200, r#"{"dates":["01-Jan"],"counts":[7]}"#);
    server.enqueue_json(
        "/attendance_stats",
        200,
        r#"{"dates":["01-Jan","02-Jan"],"counts":[7,9]}"#,
    );
    let mut controller = controller_for(&server);
    let t0 = Instant::now();

    tick_and_settle(&mut controller, t0);
    assert!(controller.chart().is_none());
    assert!(controller.ui.chart.last_error.is_some());

    tick_and_settle(&mut controller, t0 + 10 * SECOND);
    assert_eq!(controller.chart().map(|chart| chart.values().to_vec()), Some(vec![7]));

    tick_and_settle(&mut controller, t0 + 20 * SECOND);
    let chart = controller.chart().expect("chart");
    assert_eq!(chart.instance_id(), 1);
    assert_eq!(chart.values(), [7, 9]);
    assert_eq!(controller.ui.chart.instances_created, 1);
}

#[test]
fn csv_export_downloads_into_file() {
    let server = MockServer::start();
    let csv = "Name,Time\nGrace,2024-03-01 08:55:00\n";
    server.enqueue("/download_csv", 200, "text/csv", csv);
    let mut controller = controller_for(&server);
    let temp = tempfile::tempdir().expect("create tempdir");
    let path = temp.path().join("attendance.csv");

    controller.export_csv_to(path.clone());
    assert!(controller.wait_for_jobs(Instant::now(), JOB_TIMEOUT));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), csv);
    assert_eq!(controller.ui.export.last_path.as_deref(), Some(path.as_path()));
}
