use std::time::Duration;

use pacer_core::errors::PacerError;
use pacer_core::PacerConfig;
use pacer_runtime::{PacerHandle, PacerRuntime};
use serde_json::json;
use test_fixtures::{EffectLog, RecordingApplier};

fn start() -> (PacerHandle, EffectLog) {
    let applier = RecordingApplier::new();
    let log = applier.log();
    let handle = PacerRuntime::start(PacerConfig::default(), applier).unwrap();
    (handle, log)
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn signal_is_admitted_after_settle_window() {
    let (handle, log) = start();

    assert!(handle.submit("undo-loop", json!({})).unwrap());
    sleep_ms(50).await;
    assert!(log.applied().is_empty());

    sleep_ms(100).await;
    let snapshot = handle.snapshot().unwrap();
    assert_eq!(
        snapshot.active_action.map(|a| a.pattern_name),
        Some("focus-assist".to_string())
    );
    assert_eq!(log.applied(), vec!["focus-assist"]);
}

#[tokio::test(start_paused = true)]
async fn active_action_expires_on_its_own() {
    let (handle, log) = start();

    handle.submit("fast-action", json!({})).unwrap();
    sleep_ms(150).await;
    assert!(handle.snapshot().unwrap().active_action.is_some());

    sleep_ms(1_000).await;
    assert!(handle.snapshot().unwrap().active_action.is_none());
    assert_eq!(log.clear_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn burst_from_several_handles_drains_once() {
    let (handle, log) = start();
    let other = handle.clone();

    handle.submit("dwell", json!({})).unwrap();
    sleep_ms(40).await;
    other.submit("backtrack", json!({})).unwrap();
    sleep_ms(40).await;
    handle.submit("hover-repeat", json!({})).unwrap();
    sleep_ms(300).await;

    let snapshot = other.snapshot().unwrap();
    assert_eq!(snapshot.counters.drain_passes, 1);
    assert_eq!(snapshot.counters.processed, 3);
    assert_eq!(log.applied(), vec!["navigation-guide"]);
    assert!(!handle.is_draining());
}

#[tokio::test(start_paused = true)]
async fn throttling_is_visible_through_the_handle() {
    let (handle, _log) = start();

    assert!(handle.submit("dwell", json!({})).unwrap());
    assert!(handle.is_throttled("dwell").unwrap());
    assert!(!handle.submit("dwell", json!({})).unwrap());

    sleep_ms(1_000).await;
    assert!(!handle.is_throttled("dwell").unwrap());
}

#[tokio::test(start_paused = true)]
async fn clear_active_and_reset_through_the_handle() {
    let (handle, log) = start();

    handle.submit("backtrack", json!({})).unwrap();
    sleep_ms(150).await;
    assert!(handle.clear_active().unwrap());
    assert!(!handle.clear_active().unwrap());
    assert_eq!(log.clear_count(), 1);

    handle.submit("dwell", json!({})).unwrap();
    handle.reset().unwrap();
    sleep_ms(500).await;
    let snapshot = handle.snapshot().unwrap();
    assert_eq!(snapshot.backlog_length, 0);
    assert!(snapshot.active_action.is_none());
    assert_eq!(snapshot.counters.drain_passes, 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_reverts_active_action_and_stops_intake() {
    let (handle, log) = start();
    let other = handle.clone();

    handle.submit("hover-repeat", json!({})).unwrap();
    sleep_ms(150).await;
    assert_eq!(log.applied(), vec!["hover-relief"]);

    handle.shutdown().await.unwrap();
    assert_eq!(log.clear_count(), 1);
    assert!(matches!(
        other.submit("dwell", json!({})),
        Err(PacerError::RuntimeStopped { .. })
    ));
    // A second shutdown is harmless.
    other.shutdown().await.unwrap();
}
