//! Zip archive and plain file output.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::{AppError, Result};

/// Writes text entries into a deflate-compressed zip file.
pub struct ZipArchiveWriter {
    path: PathBuf,
    writer: ZipWriter<File>,
    options: SimpleFileOptions,
    entries: usize,
}

impl ZipArchiveWriter {
    /// Creates the archive file, including missing parent directories.
    ///
    /// # Errors
    /// Returns error if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;
        let file = File::create(path)
            .map_err(|e| AppError::io(format!("Failed to create {}", path.display()), e))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: ZipWriter::new(file),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: 0,
        })
    }

    /// Adds one file to the archive.
    ///
    /// # Errors
    /// Returns error if the entry cannot be written.
    pub fn add_entry(&mut self, name: &str, contents: &str) -> Result<()> {
        self.writer
            .start_file(name, self.options)
            .map_err(|e| AppError::archive(&self.path, e))?;
        self.writer
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::io(format!("Failed to write archive entry {name}"), e))?;
        self.entries += 1;
        Ok(())
    }

    /// Writes the central directory and closes the archive.
    ///
    /// # Errors
    /// Returns error if the archive cannot be finalized.
    pub fn finish(self) -> Result<PathBuf> {
        self.writer
            .finish()
            .map_err(|e| AppError::archive(&self.path, e))?;

        tracing::info!(path = %self.path.display(), entries = self.entries, "Archive written");
        Ok(self.path)
    }
}

/// Writes `contents` to `path`, creating parent directories as needed.
///
/// # Errors
/// Returns error if the directory or file cannot be written.
pub fn write_single_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create {}", path.display()), e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| AppError::io("Failed to write file", e))?;

    tracing::debug!(path = %path.display(), "File written");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::io(format!("Failed to create directory {}", parent.display()), e)
        })?;
    }
    Ok(())
}
