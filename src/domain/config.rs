//! Application configuration.
//!
//! Loaded from a TOML file; every field has a default so a partial or
//! missing file is valid.

use std::path::PathBuf;

use serde::Deserialize;

use super::models::ExportFormat;

/// How timestamps are shown to the user.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// chrono strftime pattern, rendered in local time.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
        }
    }
}

fn default_time_format() -> String {
    "%-m/%-d/%Y, %-I:%M:%S %p".to_string()
}

/// Export defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory that exports land in when no path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Format used when `--format` is not given.
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: ExportFormat::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

/// Complete application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chatgpt-export")
    }

    /// Get the default config file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }
}
