//! Infrastructure layer - filesystem adapters.
//!
//! This layer handles all I/O: reading the export, configuration files and
//! writing output files or archives.

pub mod archive;
pub mod config;
pub mod input;

pub use archive::{write_single_file, ZipArchiveWriter};
pub use config::{ensure_config_exists, load_config};
pub use input::read_export_file;
