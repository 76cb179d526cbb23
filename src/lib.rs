//! carpark_locations library: car park location collection from LTA DataMall.
//!
//! Pages through the `CarParkAvailabilityv2` endpoint, keeps the first
//! coordinate reported for each car park, and writes the result to a sorted
//! CSV file.
//!
//! # Example
//!
//! ```no_run
//! use carpark_locations::{run_collection, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     account_key: std::env::var("LTA_ACCOUNT_KEY")?,
//!     output: PathBuf::from("carpark_locations.csv"),
//!     ..Default::default()
//! };
//!
//! let report = run_collection(config).await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod collect;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod location;

// Re-export public API
pub use collect::{collect_locations, Collection, CollectionStats, Locations, PaginationPlan};
pub use config::{Config, LogFormat, LogLevel};
pub use location::{parse_location, Coordinate};
pub use run::{run_collection, CollectionReport};

// Internal run module (wires fetcher, collector and writer together)
mod run {
    use anyhow::{Context, Result};
    use log::{error, info, warn};
    use std::path::PathBuf;
    use std::time::Instant;

    use crate::collect::{collect_locations, CollectionStats};
    use crate::config::Config;
    use crate::export::write_csv;
    use crate::fetch::DataMallClient;
    use crate::initialization::init_client;

    /// Outcome of a completed collection run.
    #[derive(Debug, Clone)]
    pub struct CollectionReport {
        /// Rows written to the output file (zero means no file was written)
        pub records_written: usize,
        /// Output file path
        pub output_path: PathBuf,
        /// Page and row counters
        pub stats: CollectionStats,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl CollectionReport {
        /// One-line, human-readable result of the run.
        pub fn summary(&self) -> String {
            if self.records_written == 0 {
                "No locations collected. Check your AccountKey or API availability.".to_string()
            } else {
                format!(
                    "Wrote {} records to {}",
                    self.records_written,
                    self.output_path.display()
                )
            }
        }
    }

    /// Runs one collection: fetch every page, then write the CSV.
    ///
    /// When nothing is collected no file is written and the report carries
    /// `records_written == 0`.
    ///
    /// # Errors
    ///
    /// - The HTTP client cannot be built
    /// - A page still fails after all retry attempts. Locations from earlier
    ///   pages are discarded unless `config.keep_partial` is set, in which
    ///   case they are written before the error is returned. A failure to
    ///   write them is logged and the fetch error is still returned.
    /// - The output file cannot be written
    pub async fn run_collection(config: Config) -> Result<CollectionReport> {
        let start_time = Instant::now();

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let source = DataMallClient::new(
            client,
            config.base_url.clone(),
            config.account_key.clone(),
            config.retry_policy(),
        );
        let plan = config.pagination_plan();

        info!(
            "Collecting car park locations from {} (offsets 0..={} step {})",
            config.base_url, plan.max_skip, plan.step
        );

        let collection = match collect_locations(&source, &plan).await {
            Ok(collection) => collection,
            Err(err) => {
                if config.keep_partial && !err.partial.locations.is_empty() {
                    match write_csv(&err.partial.locations, &config.output) {
                        Ok(written) => warn!(
                            "Kept {} partial record(s) in {} after fetch failure",
                            written,
                            config.output.display()
                        ),
                        // The fetch failure stays the reported error.
                        Err(write_err) => error!(
                            "Could not keep partial records in {}: {:#}",
                            config.output.display(),
                            write_err
                        ),
                    }
                }
                return Err(err).context("Car park collection aborted");
            }
        };

        let records_written = if collection.locations.is_empty() {
            warn!("No locations collected; not writing {}", config.output.display());
            0
        } else {
            write_csv(&collection.locations, &config.output)?
        };

        Ok(CollectionReport {
            records_written,
            output_path: config.output,
            stats: collection.stats,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

}
