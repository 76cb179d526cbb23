//! Pagination loop and first-seen accumulation of car park locations.

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::config::{MAX_SKIP, PAGE_DELAY, PAGE_STEP};
use crate::error_handling::FetchError;
use crate::fetch::{PageRow, PageSource};
use crate::location::{parse_location, Coordinate};

/// Car park identifier to coordinate.
pub type Locations = HashMap<String, Coordinate>;

/// Which offsets to request and how long to pause after each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPlan {
    /// Largest offset requested (inclusive)
    pub max_skip: u64,
    /// Increment between offsets; zero is treated as one
    pub step: u64,
    /// Pause after each processed page
    pub page_delay: Duration,
}

impl PaginationPlan {
    /// Offsets `0, step, 2 * step, ...` up to and including `max_skip`.
    pub fn offsets(&self) -> impl Iterator<Item = u64> {
        let step = usize::try_from(self.step.max(1)).unwrap_or(usize::MAX);
        (0..=self.max_skip).step_by(step)
    }
}

impl Default for PaginationPlan {
    fn default() -> Self {
        Self {
            max_skip: MAX_SKIP,
            step: PAGE_STEP,
            page_delay: PAGE_DELAY,
        }
    }
}

/// Counters describing one collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Pages returned by the source, including the final empty one
    pub pages_fetched: usize,
    /// Rows seen across all pages
    pub rows_seen: usize,
    /// Rows that produced a new location
    pub rows_accepted: usize,
    /// Rows without a `CarParkID` or `Location`
    pub skipped_missing_fields: usize,
    /// Rows whose identifier was already collected
    pub skipped_duplicates: usize,
    /// Rows whose `Location` did not parse
    pub skipped_bad_location: usize,
    /// Whether the loop stopped on an empty page
    pub reached_end: bool,
}

impl CollectionStats {
    /// Logs the counters at `info` level.
    pub fn log_summary(&self) {
        info!(
            "Fetched {} page(s), {} row(s): {} accepted, {} missing fields, {} duplicate, {} bad location{}",
            self.pages_fetched,
            self.rows_seen,
            self.rows_accepted,
            self.skipped_missing_fields,
            self.skipped_duplicates,
            self.skipped_bad_location,
            if self.reached_end { " (end of data)" } else { "" }
        );
    }
}

/// Locations gathered so far plus the counters behind them.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// First-seen coordinate per identifier
    pub locations: Locations,
    /// Row and page counters
    pub stats: CollectionStats,
}

enum RowOutcome {
    Accepted,
    MissingField,
    Duplicate,
    BadLocation,
}

impl Collection {
    /// Adds one row if it carries a new identifier and a parseable location.
    fn ingest(&mut self, row: PageRow) {
        self.stats.rows_seen += 1;

        let outcome = match (row.carpark_id, row.location) {
            (Some(id), Some(location)) => {
                if self.locations.contains_key(&id) {
                    debug!("Skipping duplicate car park {}", id);
                    RowOutcome::Duplicate
                } else if let Some(coordinate) = parse_location(&location) {
                    self.locations.insert(id, coordinate);
                    RowOutcome::Accepted
                } else {
                    debug!("Skipping car park {}: unparseable location {:?}", id, location);
                    RowOutcome::BadLocation
                }
            }
            _ => RowOutcome::MissingField,
        };

        match outcome {
            RowOutcome::Accepted => self.stats.rows_accepted += 1,
            RowOutcome::MissingField => self.stats.skipped_missing_fields += 1,
            RowOutcome::Duplicate => self.stats.skipped_duplicates += 1,
            RowOutcome::BadLocation => self.stats.skipped_bad_location += 1,
        }
    }
}

/// A page fetch failed after its retries; carries what was collected before.
#[derive(Debug, Error)]
#[error("Failed to fetch page at offset {offset}")]
pub struct CollectError {
    /// Offset whose fetch failed
    pub offset: u64,
    /// Locations collected from earlier pages
    pub partial: Collection,
    /// Error of the final attempt
    #[source]
    pub source: FetchError,
}

/// Walks the offsets in `plan`, keeping the first location seen per car park.
///
/// Stops at the first empty page. Rows missing a field, repeating an
/// identifier, or holding an unparseable location are skipped.
///
/// # Errors
///
/// Returns [`CollectError`] as soon as a page cannot be fetched.
pub async fn collect_locations<S: PageSource>(
    source: &S,
    plan: &PaginationPlan,
) -> Result<Collection, CollectError> {
    let mut collection = Collection::default();

    for offset in plan.offsets() {
        let page = match source.fetch_page(offset).await {
            Ok(page) => page,
            Err(source) => {
                return Err(CollectError {
                    offset,
                    partial: collection,
                    source,
                })
            }
        };
        collection.stats.pages_fetched += 1;

        if page.is_empty() {
            info!("No rows at offset {}; end of data", offset);
            collection.stats.reached_end = true;
            break;
        }

        let row_count = page.rows.len();
        let before = collection.locations.len();
        for row in page.rows {
            collection.ingest(row);
        }
        info!(
            "Offset {}: {} row(s), {} new location(s)",
            offset,
            row_count,
            collection.locations.len() - before
        );

        if !plan.page_delay.is_zero() {
            tokio::time::sleep(plan.page_delay).await;
        }
    }

    collection.stats.log_summary();
    Ok(collection)
}
