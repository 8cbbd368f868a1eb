//! Domain layer - core types and errors.
//!
//! This layer contains the conversation model, configuration types and
//! error types without any I/O.

pub mod config;
pub mod error;
pub mod models;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use models::{
    timestamp_to_datetime, Conversation, ExportFormat, ExtractedMessage, Message, Node,
    SessionStats,
};
