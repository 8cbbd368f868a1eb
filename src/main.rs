//! ChatGPT Export - browse and export conversations from a ChatGPT data export.
//!
//! Reads the `conversations.json` file of a ChatGPT data export, recovers the
//! message order of each conversation and exports them as JSON or plain text,
//! one file at a time or all together in a zip archive.
//!
//! QUICK START:
//!   chatgpt-export list conversations.json
//!   chatgpt-export show conversations.json 3
//!   chatgpt-export export conversations.json 3 --format text -o chat.txt
//!   chatgpt-export export-all conversations.json --format json

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    archive_filename, export_batch, export_conversation, extract_messages,
    format_conversations_table, format_created, format_messages_inline, format_stats,
    single_file_path, ExportSession, TextOptions,
};
use cli::{Cli, Commands};
use domain::{AppConfig, ExportFormat};
use infrastructure::{ensure_config_exists, load_config, write_single_file, ZipArchiveWriter};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Commands::InitConfig) {
        return cmd_init_config(cli.config.as_deref());
    }

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::List { file, limit } => cmd_list(&file, limit, &config)?,
        Commands::Show { file, selector } => cmd_show(&file, &selector, &config)?,
        Commands::Export {
            file,
            selector,
            format,
            output,
        } => cmd_export(
            &file,
            &selector,
            format.unwrap_or(config.export.format),
            output.as_deref(),
            &config,
        )?,
        Commands::ExportAll { file, format, dir } => cmd_export_all(
            &file,
            format.unwrap_or(config.export.format),
            dir.as_deref(),
            &config,
        )?,
        Commands::Stats { file } => cmd_stats(&file)?,
        Commands::InitConfig => {}
    }

    Ok(())
}

fn text_options(config: &AppConfig) -> TextOptions {
    TextOptions {
        time_format: config.display.time_format.clone(),
    }
}

/// List conversations command.
fn cmd_list(file: &Path, limit: Option<usize>, config: &AppConfig) -> domain::Result<()> {
    let session = ExportSession::load(file)?;

    if session.is_empty() {
        println!("No conversations found in the file.");
        return Ok(());
    }

    println!(
        "{}",
        format_conversations_table(&session, limit, &config.display.time_format)
    );
    println!();
    println!("Total: {} conversation(s)", session.conversations().len());

    Ok(())
}

/// Show a single conversation inline.
fn cmd_show(file: &Path, selector: &str, config: &AppConfig) -> domain::Result<()> {
    let session = ExportSession::load(file)?;
    let conv = session.find(selector)?;
    let time_format = &config.display.time_format;

    println!("{}", conv.display_title().bold());
    println!("Created: {}", format_created(conv, time_format));
    println!();

    let messages = extract_messages(conv);
    println!("{}", format_messages_inline(&messages, time_format));

    Ok(())
}

/// Export a single conversation to a file or stdout.
fn cmd_export(
    file: &Path,
    selector: &str,
    format: ExportFormat,
    output: Option<&Path>,
    config: &AppConfig,
) -> domain::Result<()> {
    let session = ExportSession::load(file)?;
    let conv = session.find(selector)?;
    let entry = export_conversation(conv, format, &text_options(config))?;

    let path = match output {
        Some(path) if path == Path::new("-") => {
            println!("{}", entry.contents);
            return Ok(());
        }
        Some(path) => path.to_path_buf(),
        None => single_file_path(&config.export.output_dir, &entry),
    };

    write_single_file(&path, &entry.contents)?;
    println!(
        "{} {} → {}",
        "✓".green().bold(),
        conv.display_title().cyan(),
        path.display()
    );

    Ok(())
}

/// Export all conversations into one zip archive.
fn cmd_export_all(
    file: &Path,
    format: ExportFormat,
    dir: Option<&Path>,
    config: &AppConfig,
) -> domain::Result<()> {
    let session = ExportSession::load(file)?;
    if session.is_empty() {
        return Err(domain::AppError::invalid_data(
            "No conversations to download. The export contains no conversations.",
        ));
    }

    let batch = export_batch(&session, format, &text_options(config))?;

    let dir: PathBuf = dir.map_or_else(|| config.export.output_dir.clone(), Path::to_path_buf);
    let archive_path = dir.join(archive_filename(format, Local::now().date_naive()));

    let mut archive = ZipArchiveWriter::create(&archive_path)?;
    for entry in &batch.entries {
        archive.add_entry(&entry.filename, &entry.contents)?;
    }
    let archive_path = archive.finish()?;

    for skipped in &batch.skipped {
        println!(
            "{} skipped {}: {}",
            "!".yellow().bold(),
            skipped.title,
            skipped.reason
        );
    }
    println!(
        "\n{} Exported {} conversations ({}) to {}",
        "📦".bold(),
        batch.entries.len(),
        format,
        archive_path.display()
    );

    Ok(())
}

/// Show statistics command.
fn cmd_stats(file: &Path) -> domain::Result<()> {
    let session = ExportSession::load(file)?;
    println!("{}", format_stats(&session.stats()));

    for rejected in session.rejected() {
        println!(
            "  {} entry {}: {}",
            "!".yellow(),
            rejected.index,
            rejected.reason
        );
    }

    Ok(())
}

/// Write the default configuration file.
fn cmd_init_config(path: Option<&Path>) -> anyhow::Result<()> {
    let path = path.map_or_else(AppConfig::default_config_path, Path::to_path_buf);

    if ensure_config_exists(&path)
        .with_context(|| format!("Failed to initialize {}", path.display()))?
    {
        println!("{} Created {}", "✓".green().bold(), path.display());
    } else {
        println!("Config already exists: {}", path.display());
    }

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
