//! Configuration loading and validation
//!
//! Tuning knobs (grid step, worker cap, timeouts, pacing, output) live in
//! an optional TOML file; the search itself comes from the command line.
//! Defaults match the values the tool ships with.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, GridConfig, LimitsConfig, OutputConfig, OutputFormat, WorkerConfig};
pub use validation::validate;
