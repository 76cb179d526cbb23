//! Page fetching from the DataMall endpoint.
//!
//! This module provides:
//! - [`DataMallClient`]: authenticated GET per offset with bounded retry
//! - [`RetryPolicy`]: the backoff schedule between attempts
//! - [`Page`] / [`PageSource`]: the row batch and the seam the collector uses

mod client;
mod page;
mod retry;

pub use client::DataMallClient;
pub use page::{Page, PageRow, PageSource};
pub use retry::RetryPolicy;
