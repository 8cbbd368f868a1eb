//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ExportFormat;

/// ChatGPT Export - browse and export conversations from a ChatGPT data export.
///
/// Point any command at the `conversations.json` file from the export.
#[derive(Parser, Debug)]
#[command(name = "chatgpt-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the conversations in an export.
    List {
        /// Export file (conversations.json).
        file: PathBuf,

        /// Maximum number of conversations to show.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the messages of one conversation.
    Show {
        /// Export file (conversations.json).
        file: PathBuf,

        /// Conversation number from `list`, or a (partial) conversation id.
        selector: String,
    },

    /// Export one conversation to a file or stdout.
    Export {
        /// Export file (conversations.json).
        file: PathBuf,

        /// Conversation number from `list`, or a (partial) conversation id.
        selector: String,

        /// Output format: json or text.
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Output file path ("-" for stdout). Defaults to the output directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every conversation into a single zip archive.
    ExportAll {
        /// Export file (conversations.json).
        file: PathBuf,

        /// Output format: json or text.
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Directory to write the archive to.
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Show statistics about an export.
    Stats {
        /// Export file (conversations.json).
        file: PathBuf,
    },

    /// Write the default configuration file if it does not exist.
    InitConfig,
}
