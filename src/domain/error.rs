//! Domain-level error types for chatgpt-export.
//!
//! All errors are typed with `thiserror` and carry a message that is safe to
//! show to the end user as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// The input file was rejected before reading (wrong extension, missing).
    #[error("{message}")]
    InvalidInput { message: String },

    /// The export parsed as JSON but is not an array of conversations.
    #[error("Invalid JSON structure. Expected an array of conversations.")]
    InvalidStructure,

    /// A single conversation (or a lookup against the loaded set) is unusable.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// JSON parsing failed.
    #[error("Error parsing JSON file: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Serializing a conversation for export failed.
    #[error("Error serializing conversation: {message}")]
    Serialize {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Writing the zip archive failed.
    #[error("Error generating ZIP file {}: {message}", path.display())]
    Archive {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<zip::result::ZipError>,
    },
}

impl AppError {
    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a serialization error.
    pub fn serialize(err: serde_json::Error) -> Self {
        Self::Serialize {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create an archive error for the zip file at `path`.
    pub fn archive(path: impl Into<PathBuf>, err: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an invalid-data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
