//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mastodon_openapi` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Writing the rendered document to a file or stdout
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mastodon_openapi::initialization::init_logger_with;
use mastodon_openapi::{generate_document, render_document, write_document, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::from(Opt::parse());

    // Logs go to stderr; stdout carries the document
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match generate_document(&config).await {
        Ok(report) => {
            let text = render_document(&report.document, config.format)
                .context("Failed to render document")?;
            write_document(&text, config.output.as_deref()).context("Failed to write document")?;
            eprintln!(
                "Generated {} path{} ({} operations, {} schemas) in {:.1}s with {} warning{}",
                report.path_count,
                if report.path_count == 1 { "" } else { "s" },
                report.operation_count,
                report.schema_count,
                report.elapsed_seconds,
                report.stats.total_warnings(),
                if report.stats.total_warnings() == 1 { "" } else { "s" },
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("mastodon_openapi error: {:#}", e);
            process::exit(1);
        }
    }
}
