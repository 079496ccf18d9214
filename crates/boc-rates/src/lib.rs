//! Bank of China Rate Crate
//!
//! This crate scrapes the Bank of China foreign exchange quotation pages
//! and extracts the published rates for a single currency.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     Catalog      |  (code -> localized name)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |  RateAggregator  | --> |   PageFetcher    |  (one GET per page)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |    Extractor     |  (table rows -> RateRecord)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RateRecord`] - One published row, all fields kept as text
//! - [`RateAggregator`] - Walks the fixed page set and merges matches
//! - [`PageFetcher`] - Seam for the outbound HTTP request
//! - [`RateError`] - Errors raised by fetching and aggregation

pub mod aggregator;
pub mod catalog;
pub mod client;
pub mod errors;
pub mod extractor;
pub mod models;

pub use aggregator::{RateAggregator, CONTINUATION_PAGES, DEFAULT_BASE_URL};
pub use catalog::{is_supported, lookup, supported_codes};
pub use client::{BocClient, PageFetcher};
pub use errors::RateError;
pub use extractor::extract;
pub use models::{ListingPage, RateRecord};
