//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `book_shelf` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All server functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use book_shelf::initialization::init_logger_with;
use book_shelf::{run_server, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; flags and real environment variables take precedence
    let _ = dotenvy::dotenv();

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run_server(config).await {
        log::error!("book_shelf error: {:#}", e);
        eprintln!("book_shelf error: {:#}", e);
        process::exit(1);
    }

    Ok(())
}
