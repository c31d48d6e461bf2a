//! Interactive session tests

use chrono::{TimeZone, Utc};
use std::sync::Arc;

use crate::app::cli::session::*;
use crate::core::time::MockClock;
use crate::repository::api::{InMemoryScanRepository, ScanFilters, ScanRepository};
use crate::scanner::api::{
    ScanContext, ScanLifecycleController, DUPLICATE_DECLINED_MESSAGE, PARSE_FAILURE_MESSAGE,
};

fn setup() -> (Arc<InMemoryScanRepository>, ScanLifecycleController) {
    let clock = Arc::new(MockClock::at(
        Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap(),
    ));
    let repository = Arc::new(InMemoryScanRepository::new(clock.clone()));
    let controller = ScanLifecycleController::with_clock(
        repository.clone(),
        ScanContext::new("shop-1", "desk"),
        clock,
    );
    (repository, controller)
}

async fn run(controller: &ScanLifecycleController, input: &str, auto_accept: bool) -> (SessionSummary, String) {
    let mut out = Vec::new();
    let options = SessionOptions {
        auto_accept_duplicates: auto_accept,
        ..SessionOptions::default()
    };
    let summary = run_session(controller, input.as_bytes(), &mut out, &options)
        .await
        .unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_session_saves_each_line() {
    let (repository, controller) = setup();

    let (summary, output) = run(
        &controller,
        "GP|ABC123GP|2024-12|MV\n\nrandom text\\nXYZ456WC\\nsome other line\n",
        false,
    )
    .await;

    assert_eq!(summary.saved, 2);
    assert_eq!(repository.len().await, 2);
    assert!(output.contains("Saved ABC123GP (Gauteng, expires 2024-12, Motor Vehicle)"));
    assert!(output.contains("Saved XYZ456WC (Western Cape, expires Unknown, Motor Vehicle)"));
}

#[tokio::test]
async fn test_session_reports_unreadable_line() {
    let (repository, controller) = setup();

    let (summary, output) = run(
        &controller,
        "no license pattern here at all 12345\nGP|ABC123GP|2024-12|MV\n",
        false,
    )
    .await;

    assert_eq!(summary.unreadable, 1);
    assert_eq!(summary.saved, 1);
    assert!(output.contains(PARSE_FAILURE_MESSAGE));
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_session_asks_before_saving_duplicate() {
    let (repository, controller) = setup();

    let (summary, output) = run(
        &controller,
        "GP|ABC123GP|2024-12|MV\nGP|ABC123GP|2024-12|MV\nn\nGP|ABC123GP|2024-12|MV\ny\n",
        false,
    )
    .await;

    assert_eq!(summary.saved, 2);
    assert_eq!(summary.declined, 1);
    assert!(output.contains("Scan anyway? [y/N]"));
    assert!(output.contains(DUPLICATE_DECLINED_MESSAGE));
    let scans = repository
        .get_scans("shop-1", &ScanFilters::default(), 10, 0)
        .await
        .unwrap();
    assert_eq!(scans.len(), 2);
}

#[tokio::test]
async fn test_session_auto_accepts_duplicates() {
    let (repository, controller) = setup();

    let (summary, output) = run(
        &controller,
        "GP|ABC123GP|2024-12|MV\nGP|ABC123GP|2024-12|MV\n",
        true,
    )
    .await;

    assert_eq!(summary.saved, 2);
    assert!(!output.contains("Scan anyway?"));
    assert_eq!(repository.len().await, 2);
}

#[tokio::test]
async fn test_input_ending_at_prompt_declines() {
    let (repository, controller) = setup();

    let (summary, _) = run(
        &controller,
        "GP|ABC123GP|2024-12|MV\nGP|ABC123GP|2024-12|MV\n",
        false,
    )
    .await;

    assert_eq!(summary.declined, 1);
    assert_eq!(repository.len().await, 1);
}
