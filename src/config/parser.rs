use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// The file is parsed as TOML and validated before it is returned; a
/// missing section falls back to the shipped defaults.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use gridsweep::config::load_config;
///
/// let config = load_config(Path::new("gridsweep.toml")).unwrap();
/// println!("Grid step: {} km", config.grid.step_km);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}
