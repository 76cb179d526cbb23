//! Configuration constants.
//!
//! Defaults for every tunable in [`Config`](super::Config). The values match
//! the DataMall endpoint's paging behaviour (500 rows per page).

use std::time::Duration;

/// DataMall car park availability endpoint.
pub const DEFAULT_BASE_URL: &str =
    "https://datamall2.mytransport.sg/ltaodataservice/CarParkAvailabilityv2";

/// Header carrying the account key on every request.
pub const ACCOUNT_KEY_HEADER: &str = "AccountKey";

/// Query parameter used for pagination.
pub const SKIP_QUERY_PARAM: &str = "$skip";

/// Default CSV output path.
pub const DEFAULT_OUTPUT_PATH: &str = "carpark_locations.csv";

// Pagination
/// Largest `$skip` offset requested (inclusive).
pub const MAX_SKIP: u64 = 2500;
/// Offset increment between pages. Matches the endpoint's page size.
pub const PAGE_STEP: u64 = 500;
/// Pause after each processed page to stay clear of the platform's rate limits.
pub const PAGE_DELAY: Duration = Duration::from_millis(200);

/// Per-attempt HTTP timeout in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Retry strategy
/// Maximum number of attempts per page (including the initial attempt)
pub const RETRY_MAX_ATTEMPTS: u32 = 3;
/// Delay in milliseconds before the first retry
pub const RETRY_BASE_DELAY_MS: u64 = 1000;
/// Factor by which the retry delay grows on each attempt
pub const RETRY_BACKOFF_FACTOR: f64 = 1.5;

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("carpark_locations/", env!("CARGO_PKG_VERSION"));
