//! Integration tests for the full sweep cycle
//!
//! These drive the engine end-to-end with stub fetchers and real exporters.

use async_trait::async_trait;
use gridsweep::config::Config;
use gridsweep::engine::{run_sweep, ProgressFn, RunPlan, TaskFailure};
use gridsweep::fetch::{FetchError, FetchResult, Fetcher, SearchTask};
use gridsweep::geo::GeoPoint;
use gridsweep::output::CsvExporter;
use gridsweep::places::Place;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

/// Plan over a 4-point grid (radius 2.5 km at the default 2.5 km step)
fn create_test_plan() -> RunPlan {
    let mut config = Config::default();
    config.workers.batch_pause_ms = 0;
    config.workers.task_timeout_secs = 5;

    RunPlan::new(
        GeoPoint::new(44.9778, -93.2650),
        "coffee shop",
        2.5,
        &config,
    )
    .expect("plan should validate")
}

/// Fetcher returning the same fixed place for every task
struct FixedFetcher;

#[async_trait]
impl Fetcher for FixedFetcher {
    async fn fetch(&self, task: &SearchTask) -> FetchResult<Vec<Place>> {
        Ok(vec![Place {
            name: "Blue Door Cafe".to_string(),
            address: "123 Main St".to_string(),
            rating: 4.6,
            review_count: 1204,
            coordinates: task.center,
            hours: None,
            phone: None,
            website: None,
        }])
    }
}

/// Fetcher that finds nothing anywhere
struct EmptyFetcher;

#[async_trait]
impl Fetcher for EmptyFetcher {
    async fn fetch(&self, _task: &SearchTask) -> FetchResult<Vec<Place>> {
        Ok(Vec::new())
    }
}

/// Fetcher that fails every task
struct FailingFetcher;

#[async_trait]
impl Fetcher for FailingFetcher {
    async fn fetch(&self, _task: &SearchTask) -> FetchResult<Vec<Place>> {
        Err(FetchError::Url("search backend unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_sweep_dedupes_to_single_place() {
    let dir = tempdir().unwrap();
    let exporter = CsvExporter::new(dir.path().join("out.csv"));

    let plan = create_test_plan();
    assert_eq!(plan.grid().len(), 4);

    let report = run_sweep(&plan, Arc::new(FixedFetcher), &exporter, None)
        .await
        .expect("sweep should succeed");

    assert_eq!(report.grid_points, 4);
    assert!(report.failures.is_empty());
    assert_eq!(report.places.len(), 1);

    let receipt = report.receipt.expect("a non-empty run exports");
    assert_eq!(receipt.places_written, 1);

    let content = std::fs::read_to_string(receipt.path).unwrap();
    // Header plus exactly one deduplicated place
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("Blue Door Cafe"));
}

#[tokio::test]
async fn test_sweep_with_no_results_skips_export() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.csv");
    let exporter = CsvExporter::new(out_path.clone());

    let report = run_sweep(&create_test_plan(), Arc::new(EmptyFetcher), &exporter, None)
        .await
        .expect("an empty run is not an error");

    assert!(report.places.is_empty());
    assert!(report.failures.is_empty());
    assert!(report.receipt.is_none());
    assert!(!out_path.exists());
}

#[tokio::test]
async fn test_sweep_records_failures_without_aborting() {
    let dir = tempdir().unwrap();
    let exporter = CsvExporter::new(dir.path().join("out.csv"));

    let report = run_sweep(
        &create_test_plan(),
        Arc::new(FailingFetcher),
        &exporter,
        None,
    )
    .await
    .expect("per-task failures never fail the run");

    assert_eq!(report.failures.len(), 4);
    assert!(report
        .failures
        .iter()
        .all(|f| matches!(f, TaskFailure::Fetch { .. })));
    assert!(report.places.is_empty());
    assert!(report.receipt.is_none());
}

#[tokio::test]
async fn test_sweep_progress_hook_sees_every_task() {
    let dir = tempdir().unwrap();
    let exporter = CsvExporter::new(dir.path().join("out.csv"));

    let completed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completed);
    let progress: ProgressFn = Arc::new(move |_outcome| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    run_sweep(
        &create_test_plan(),
        Arc::new(FixedFetcher),
        &exporter,
        Some(progress),
    )
    .await
    .expect("sweep should succeed");

    assert_eq!(completed.load(Ordering::SeqCst), 4);
}
