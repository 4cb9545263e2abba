//! The grid-dispatch concurrency engine
//!
//! This module orchestrates a whole run:
//! - Deriving the sub-search grid from a validated plan
//! - Batched worker-pool execution with per-task timeouts and pacing
//! - Folding collected batches into the deduplicated place set
//! - Handing the final set to an exporter

mod dispatcher;
mod estimate;

pub use dispatcher::{Dispatcher, ProgressFn, TaskFailure, TaskOutcome};
pub use estimate::estimate_duration;

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::geo::{generate_grid, GeoPoint};
use crate::output::{ExportReceipt, Exporter};
use crate::places::PlaceSet;
use crate::ConfigError;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Immutable configuration snapshot for one run
///
/// Built from the search arguments and the loaded config, validated once,
/// and fixed before any dispatch. The dispatcher reads every knob from
/// here; nothing is ambient.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub center: GeoPoint,
    pub query: String,
    pub radius_km: f64,
    pub grid_step_km: f64,
    /// Radius each sub-search applies around its own grid point
    pub sub_radius_km: f64,
    pub max_workers: usize,
    pub task_timeout: Duration,
    pub batch_pause: Duration,
}

impl RunPlan {
    /// Builds and validates a plan from search arguments and configuration
    ///
    /// A radius above the configured maximum rejects the plan outright; it
    /// is never silently clamped, and nothing is dispatched for a rejected
    /// plan.
    pub fn new(
        center: GeoPoint,
        query: impl Into<String>,
        radius_km: f64,
        config: &Config,
    ) -> Result<Self, ConfigError> {
        let query = query.into();

        if query.trim().is_empty() {
            return Err(ConfigError::Validation("query cannot be empty".to_string()));
        }

        if !(-90.0..=90.0).contains(&center.lat) {
            return Err(ConfigError::Validation(format!(
                "latitude must be between -90 and 90, got {}",
                center.lat
            )));
        }

        if !(-180.0..=180.0).contains(&center.lon) {
            return Err(ConfigError::Validation(format!(
                "longitude must be between -180 and 180, got {}",
                center.lon
            )));
        }

        if radius_km <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "radius must be positive, got {} km",
                radius_km
            )));
        }

        if radius_km > config.limits.max_radius_km {
            return Err(ConfigError::Validation(format!(
                "radius {:.1} km exceeds the configured maximum of {:.1} km",
                radius_km, config.limits.max_radius_km
            )));
        }

        Ok(Self {
            center,
            query,
            radius_km,
            grid_step_km: config.grid.step_km,
            sub_radius_km: config.grid.sub_radius_km,
            max_workers: config.workers.max_workers,
            task_timeout: Duration::from_secs(config.workers.task_timeout_secs),
            batch_pause: Duration::from_millis(config.workers.batch_pause_ms),
        })
    }

    /// The grid of sub-search centers this plan covers
    pub fn grid(&self) -> Vec<GeoPoint> {
        generate_grid(self.center, self.radius_km, self.grid_step_km)
    }
}

/// Summary of a completed run
#[derive(Debug)]
pub struct SweepReport {
    /// Number of grid points dispatched
    pub grid_points: usize,

    /// The final deduplicated place set
    pub places: PlaceSet,

    /// Per-task failures recorded during dispatch
    pub failures: Vec<TaskFailure>,

    /// Where the set was written; `None` when nothing was found
    pub receipt: Option<ExportReceipt>,

    pub elapsed: Duration,
}

/// Runs a complete sweep: grid, dispatch, merge, export
///
/// A run that collects zero places is not an error; it is reported with an
/// empty set and no export receipt. Only export failures terminate a run
/// abnormally once dispatch has begun.
pub async fn run_sweep(
    plan: &RunPlan,
    fetcher: Arc<dyn Fetcher>,
    exporter: &dyn Exporter,
    progress: Option<ProgressFn>,
) -> crate::Result<SweepReport> {
    let started = Instant::now();

    let points = plan.grid();
    tracing::info!(
        "Searching {} locations in a radius of {:.1} km around {} for query '{}'",
        points.len(),
        plan.radius_km,
        plan.center,
        plan.query
    );
    tracing::info!(
        "Estimated run time: {}s",
        estimate_duration(points.len(), plan.max_workers, plan.task_timeout).as_secs()
    );

    let mut dispatcher = Dispatcher::new(plan.clone(), fetcher);
    if let Some(progress) = progress {
        dispatcher = dispatcher.with_progress(progress);
    }

    let (batches, failures) = dispatcher.run(&points).await;

    let places = PlaceSet::from_batches(batches);
    tracing::info!(
        "Collected {} unique places from {} sub-searches ({} failed)",
        places.len(),
        points.len(),
        failures.len()
    );

    let receipt = if places.is_empty() {
        tracing::info!("No places found for the given search parameters");
        None
    } else {
        let receipt = exporter.export(&places)?;
        tracing::info!(
            "{} places saved to {}",
            receipt.places_written,
            receipt.path.display()
        );
        Some(receipt)
    };

    Ok(SweepReport {
        grid_points: points.len(),
        places,
        failures,
        receipt,
        elapsed: started.elapsed(),
    })
}
