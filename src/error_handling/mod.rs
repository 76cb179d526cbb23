//! Error types.
//!
//! - [`InitializationError`]: logger and HTTP client setup failures
//! - [`FetchError`]: a single page request that failed (network, status, body)

mod types;

// Re-export public API
pub use types::{FetchError, InitializationError};
