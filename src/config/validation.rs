use crate::config::types::{Config, GridConfig, LimitsConfig, OutputConfig, WorkerConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_limits(&config.limits)?;
    validate_grid(&config.grid)?;
    validate_workers(&config.workers)?;
    validate_output(&config.output)?;
    Ok(())
}

/// Validates hard limits
fn validate_limits(config: &LimitsConfig) -> Result<(), ConfigError> {
    if config.max_radius_km <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "max-radius-km must be positive, got {}",
            config.max_radius_km
        )));
    }

    Ok(())
}

/// Validates grid layout settings
fn validate_grid(config: &GridConfig) -> Result<(), ConfigError> {
    if config.step_km <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "step-km must be positive, got {}",
            config.step_km
        )));
    }

    if config.sub_radius_km <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "sub-radius-km must be positive, got {}",
            config.sub_radius_km
        )));
    }

    Ok(())
}

/// Validates worker pool settings
fn validate_workers(config: &WorkerConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max-workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    if config.task_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "task-timeout-secs must be >= 1, got {}",
            config.task_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output settings
fn validate_output(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
