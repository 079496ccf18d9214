//! Error types for the rate crate.

use thiserror::Error;

/// Errors that can occur while fetching and aggregating rates.
///
/// Only [`UnsupportedCurrency`](Self::UnsupportedCurrency) and
/// [`NotFound`](Self::NotFound) leave the aggregator during normal operation.
/// The page-level variants (`Http`, `UpstreamStatus`, `Timeout`, `Malformed`) are logged
/// and absorbed there.
#[derive(Error, Debug)]
pub enum RateError {
    /// The code is not in the currency catalog.
    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrency(String),

    /// No page published a row for the currency.
    #[error("No exchange rate data found for currency: {0}")]
    NotFound(String),

    /// Transport or body read failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream site answered with a non-success status.
    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus {
        /// Page that was requested
        url: String,
        /// HTTP status code returned
        status: u16,
    },

    /// The page did not arrive within the per-page deadline.
    #[error("Timed out after {millis} ms fetching {url}")]
    Timeout {
        /// Page that was requested
        url: String,
        /// Deadline that elapsed
        millis: u128,
    },

    /// The page could not be read as a rate table.
    #[error("Malformed page: {0}")]
    Malformed(String),
}
