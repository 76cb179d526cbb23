//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of one page request.
///
/// Covers connection failures, timeouts, non-2xx statuses (all surfaced by
/// `reqwest`) and response bodies that are not valid JSON.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or non-2xx response status.
    #[error(transparent)]
    Http(#[from] ReqwestError),

    /// Response body could not be decoded as JSON.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether another attempt could succeed.
    ///
    /// Only a request that could not even be built (bad header value, invalid
    /// URL) is permanent. Everything else, including 4xx statuses and bad
    /// bodies, is retried.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => !e.is_builder(),
            FetchError::Decode(_) => true,
        }
    }

    /// Short category label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http(e) => {
                if let Some(status) = e.status() {
                    match status.as_u16() {
                        401 | 403 => "unauthorized",
                        429 => "too many requests",
                        _ if status.is_server_error() => "server error",
                        _ => "http status",
                    }
                } else if e.is_builder() {
                    "request builder"
                } else if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_body() || e.is_decode() {
                    "body"
                } else {
                    "request"
                }
            }
            FetchError::Decode(_) => "malformed json",
        }
    }
}
