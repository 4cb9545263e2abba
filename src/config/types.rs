use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for gridsweep
///
/// Every section is optional in the TOML file and falls back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: LimitsConfig,
    pub grid: GridConfig,
    pub workers: WorkerConfig,
    pub output: OutputConfig,
}

/// Hard limits enforced before any dispatch
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum allowed search radius in kilometers
    #[serde(rename = "max-radius-km")]
    pub max_radius_km: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_radius_km: 25.0 }
    }
}

/// Grid layout configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Distance between grid points in kilometers
    #[serde(rename = "step-km")]
    pub step_km: f64,

    /// Radius each sub-search applies around its own grid point
    #[serde(rename = "sub-radius-km")]
    pub sub_radius_km: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step_km: 2.5,
            sub_radius_km: 1.0,
        }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Maximum number of concurrent fetch tasks
    #[serde(rename = "max-workers")]
    pub max_workers: usize,

    /// Deadline for a single fetch task (seconds)
    #[serde(rename = "task-timeout-secs")]
    pub task_timeout_secs: u64,

    /// Fixed pause between batches (milliseconds)
    #[serde(rename = "batch-pause-ms")]
    pub batch_pause_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            task_timeout_secs: 45,
            batch_pause_ms: 2000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory timestamped output files are written into
    pub directory: PathBuf,

    /// Output format when none is given on the command line
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            format: OutputFormat::Csv,
        }
    }
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Sqlite,
}
