//! Export file reading.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, Result};

/// Reads a ChatGPT export file into a string.
///
/// # Errors
/// Returns `InvalidInput` if the file name does not end in `.json`, or an IO
/// error if it cannot be read.
pub fn read_export_file(path: &Path) -> Result<String> {
    let is_json = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".json"));
    if !is_json {
        return Err(AppError::InvalidInput {
            message: "Please select a .json file.".into(),
        });
    }

    let text = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Error reading file {}", path.display()), e))?;

    tracing::debug!(bytes = text.len(), "Read export file");
    Ok(text)
}
