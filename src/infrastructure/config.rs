//! Configuration file management.
//!
//! Handles loading TOML configuration files and writing the default one.

use std::fs;
use std::path::Path;

use crate::application::validate_time_format;
use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# ChatGPT Export Configuration
# Auto-generated - edit as needed

[display]
# strftime pattern for displayed timestamps (local time)
time_format = "%-m/%-d/%Y, %-I:%M:%S %p"

[export]
# Directory for exports when no output path is given
output_dir = "exports"

# Default export format: "text" or "json"
format = "text"
"#;

/// Load configuration from `path`, or from the default location.
///
/// A missing file yields the defaults.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = path.map_or_else(AppConfig::default_config_path, Path::to_path_buf);

    if config_path.exists() {
        load_config_from_file(&config_path)
    } else {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        Ok(AppConfig::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read, parsed, or has an invalid time format.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })?;

    validate_time_format(&config.display.time_format)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Create the default configuration file if it doesn't exist.
///
/// Returns `true` if a file was written.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %path.display(), "Created default configuration");

    Ok(true)
}
