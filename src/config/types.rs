//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::collect::PaginationPlan;
use crate::config::constants::*;
use crate::fetch::RetryPolicy;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Run configuration.
///
/// Parsed from the command line by `clap`, with the account key also read from
/// the `LTA_ACCOUNT_KEY` environment variable. It can equally be built in code
/// through [`Default`]:
///
/// ```no_run
/// use carpark_locations::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     account_key: "my-key".to_string(),
///     output: PathBuf::from("out.csv"),
///     ..Default::default()
/// };
/// ```
///
/// ```bash
/// # Basic usage, key from the environment (or .env)
/// LTA_ACCOUNT_KEY=... carpark_locations
///
/// # Custom output and verbose logging
/// carpark_locations --account-key ... --output ./carparks.csv --log-level debug
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "carpark_locations",
    about = "Fetches car park locations from LTA DataMall and writes them to CSV."
)]
pub struct Config {
    /// DataMall account key
    #[arg(long, env = "LTA_ACCOUNT_KEY", hide_env_values = true)]
    pub account_key: String,

    /// CSV file to write (overwritten if it exists)
    #[arg(long, value_parser, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Car park availability endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-attempt request timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Largest `$skip` offset to request (inclusive)
    #[arg(long, default_value_t = MAX_SKIP)]
    pub max_skip: u64,

    /// Offset increment between pages
    #[arg(long, default_value_t = PAGE_STEP, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_step: u64,

    /// Pause after each processed page, in milliseconds
    #[arg(long, default_value_t = PAGE_DELAY.as_millis() as u64)]
    pub page_delay_ms: u64,

    /// Attempts per page before the run fails
    #[arg(long, default_value_t = RETRY_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub retry_attempts: u32,

    /// Delay before the first retry, in milliseconds
    #[arg(long, default_value_t = RETRY_BASE_DELAY_MS)]
    pub retry_base_delay_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Write locations collected before a fetch failure instead of discarding them
    #[arg(long)]
    pub keep_partial: bool,
}

impl Config {
    /// Retry schedule applied to every page request.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
            RETRY_BACKOFF_FACTOR,
        )
    }

    /// Offsets to request and the pause between them.
    pub fn pagination_plan(&self) -> PaginationPlan {
        PaginationPlan {
            max_skip: self.max_skip,
            step: self.page_step,
            page_delay: Duration::from_millis(self.page_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account_key: String::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            max_skip: MAX_SKIP,
            page_step: PAGE_STEP,
            page_delay_ms: PAGE_DELAY.as_millis() as u64,
            retry_attempts: RETRY_MAX_ATTEMPTS,
            retry_base_delay_ms: RETRY_BASE_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            keep_partial: false,
        }
    }
}
