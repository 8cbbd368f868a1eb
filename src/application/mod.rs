//! Application layer - the export pipeline.
//!
//! parse → extract → format/serialize. Everything here is pure apart from
//! `ExportSession::load`, which reads the input file.

pub mod exporter;
pub mod extractor;
pub mod filename;
pub mod formatter;
pub mod parser;
pub mod session;

pub use exporter::{export_batch, export_conversation, single_file_path};
pub use extractor::extract_messages;
pub use filename::archive_filename;
pub use formatter::{
    format_conversations_table, format_created, format_messages_inline, format_stats,
    validate_time_format, TextOptions,
};
pub use session::ExportSession;
