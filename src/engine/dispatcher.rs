//! Batched worker-pool dispatch
//!
//! Grid points are partitioned into consecutive batches of at most
//! `max_workers`. Batches run strictly sequentially; within a batch every
//! task runs concurrently, each wrapped in its own deadline. The dispatcher
//! waits for every task in a batch to reach a terminal state before pacing
//! and moving on, which bounds peak concurrency to `max_workers` exactly.

use crate::engine::RunPlan;
use crate::fetch::{Fetcher, SearchTask};
use crate::geo::GeoPoint;
use crate::places::Place;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::timeout;

/// Callback invoked once per task reaching a terminal state
///
/// Drives progress display only; it carries no control-flow responsibility.
pub type ProgressFn = Arc<dyn Fn(&TaskOutcome) + Send + Sync>;

/// Terminal state of one dispatched task
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    /// The fetch returned, possibly with zero places
    Fetched { point: GeoPoint, places: usize },

    /// The task exceeded its deadline and was cancelled
    TimedOut { point: GeoPoint },

    /// The fetcher reported a failure
    Failed { point: GeoPoint, message: String },
}

/// A per-task failure, recorded without aborting the run
#[derive(Debug, Clone, Error)]
pub enum TaskFailure {
    #[error("search timed out at {point}")]
    TimedOut { point: GeoPoint },

    #[error("search failed at {point}: {message}")]
    Fetch { point: GeoPoint, message: String },
}

/// Drives concurrent execution of one fetch task per grid point
pub struct Dispatcher {
    plan: RunPlan,
    fetcher: Arc<dyn Fetcher>,
    progress: Option<ProgressFn>,
}

impl Dispatcher {
    pub fn new(plan: RunPlan, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            plan,
            fetcher,
            progress: None,
        }
    }

    /// Registers a per-task-completion hook
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Runs every grid point to a terminal state
    ///
    /// Returns the collected place batches in completion order together with
    /// the recorded per-task failures. A task error or timeout never aborts
    /// the run; it simply contributes zero places.
    pub async fn run(&self, points: &[GeoPoint]) -> (Vec<Vec<Place>>, Vec<TaskFailure>) {
        let max_workers = self.plan.max_workers.max(1);
        let mut collected = Vec::new();
        let mut failures = Vec::new();

        for (index, batch) in points.chunks(max_workers).enumerate() {
            // Fixed pacing between batches; no trailing pause after the last
            if index > 0 {
                tokio::time::sleep(self.plan.batch_pause).await;
            }

            tracing::debug!("Dispatching batch {} with {} tasks", index + 1, batch.len());
            self.run_batch(batch, &mut collected, &mut failures).await;
        }

        (collected, failures)
    }

    /// Runs one batch concurrently and drains every task to a terminal state
    async fn run_batch(
        &self,
        batch: &[GeoPoint],
        collected: &mut Vec<Vec<Place>>,
        failures: &mut Vec<TaskFailure>,
    ) {
        let mut tasks = JoinSet::new();

        for &point in batch {
            let fetcher = Arc::clone(&self.fetcher);
            let deadline = self.plan.task_timeout;
            let task = SearchTask {
                center: point,
                query: self.plan.query.clone(),
                radius_km: self.plan.sub_radius_km,
            };

            tasks.spawn(async move {
                // The deadline cancels the in-flight fetch by dropping it
                match timeout(deadline, fetcher.fetch(&task)).await {
                    Ok(Ok(places)) => Ok((point, places)),
                    Ok(Err(err)) => Err(TaskFailure::Fetch {
                        point,
                        message: err.to_string(),
                    }),
                    Err(_) => Err(TaskFailure::TimedOut { point }),
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(Ok((point, places))) => {
                    tracing::debug!("Task at {} returned {} places", point, places.len());
                    let outcome = TaskOutcome::Fetched {
                        point,
                        places: places.len(),
                    };
                    collected.push(places);
                    outcome
                }
                Ok(Err(failure)) => {
                    tracing::warn!("{failure}");
                    let outcome = match &failure {
                        TaskFailure::TimedOut { point } => TaskOutcome::TimedOut { point: *point },
                        TaskFailure::Fetch { point, message } => TaskOutcome::Failed {
                            point: *point,
                            message: message.clone(),
                        },
                    };
                    failures.push(failure);
                    outcome
                }
                Err(join_err) => {
                    tracing::error!("Worker task aborted: {join_err}");
                    continue;
                }
            };

            if let Some(progress) = &self.progress {
                progress(&outcome);
            }
        }
    }
}
