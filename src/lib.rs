//! Gridsweep: a grid-dispatch local business harvester
//!
//! This crate tiles a geographic search area into a grid of sub-searches,
//! fans them out across a bounded pool of concurrent workers with per-task
//! timeouts and fixed inter-batch pacing, deduplicates the extracted places,
//! and persists the final set to CSV or SQLite.

pub mod config;
pub mod engine;
pub mod fetch;
pub mod geo;
pub mod output;
pub mod places;

use thiserror::Error;

/// Main error type for gridsweep operations
///
/// Per-task failures (timeouts, fetch errors) never surface here; they are
/// isolated at the task boundary and reported on the [`engine::SweepReport`].
/// Only pre-dispatch configuration problems and post-collection export
/// problems terminate a run abnormally.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for gridsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use engine::{run_sweep, RunPlan, SweepReport, TaskFailure};
pub use fetch::{Fetcher, SearchTask};
pub use geo::{generate_grid, GeoPoint};
pub use output::Exporter;
pub use places::{Place, PlaceSet};
