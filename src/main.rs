//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `carpark_locations` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use carpark_locations::initialization::init_logger_with;
use carpark_locations::{run_collection, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load LTA_ACCOUNT_KEY (and anything else) from .env when present.
    // Missing .env is fine: the key may come from the environment or --account-key.
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_collection(config).await {
        Ok(report) => {
            println!("{}", report.summary());
            log::debug!("Finished in {:.1}s", report.elapsed_seconds);
            Ok(())
        }
        Err(e) => {
            eprintln!("carpark_locations error: {:#}", e);
            process::exit(1);
        }
    }
}
