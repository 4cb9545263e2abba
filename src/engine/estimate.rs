use std::time::Duration;

/// Predicts total run duration from task count and worker cap
///
/// Every batch is assumed to take the full per-task duration regardless of
/// early completion, and inter-batch pauses are not counted. Deliberately
/// pessimistic, advisory only, never used to enforce a deadline.
pub fn estimate_duration(task_count: usize, max_workers: usize, per_task: Duration) -> Duration {
    if task_count == 0 {
        return Duration::ZERO;
    }

    // A single batch covers everything
    if task_count <= max_workers {
        return per_task;
    }

    let batches = task_count.div_ceil(max_workers.max(1));
    per_task * batches as u32
}
