//! Multi-page rate aggregation.
//!
//! The listing spreads its rows over a first page and four numbered
//! continuation pages. A currency may appear on any of them, and more than
//! once, so every page is read and the matches are merged.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog;
use crate::client::PageFetcher;
use crate::errors::RateError;
use crate::extractor::extract;
use crate::models::{ListingPage, RateRecord};

/// Listing base of the Bank of China foreign exchange quotations.
pub const DEFAULT_BASE_URL: &str = "https://www.boc.cn/sourcedb/whpj/";

/// Number of `index_{n}.html` pages read after `index.html`.
pub const CONTINUATION_PAGES: u8 = 4;

/// Walks the fixed page set and collects the rows for one currency.
pub struct RateAggregator {
    fetcher: Arc<dyn PageFetcher>,
    base_url: String,
    page_timeout: Option<Duration>,
}

impl RateAggregator {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_timeout: None,
        }
    }

    /// Read pages from `base_url` instead of the public listing.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Give up on a single page after `timeout`; the page then counts as empty.
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = Some(timeout);
        self
    }

    /// Pages in the order they are queried.
    pub fn pages() -> impl Iterator<Item = ListingPage> {
        std::iter::once(ListingPage::First)
            .chain((1..=CONTINUATION_PAGES).map(ListingPage::Continuation))
    }

    pub fn page_urls(&self) -> Vec<String> {
        Self::pages()
            .map(|page| page.resolve(&self.base_url))
            .collect()
    }

    /// Collect every published row for `code`.
    ///
    /// `code` must already be normalized. Pages are fetched one after another;
    /// a page that fails contributes nothing and the walk continues.
    ///
    /// # Errors
    ///
    /// - [`RateError::UnsupportedCurrency`] if `code` is not in the catalog
    ///   (no request is made)
    /// - [`RateError::NotFound`] if no page yielded a row
    pub async fn aggregate(&self, code: &str) -> Result<Vec<RateRecord>, RateError> {
        let localized_name = catalog::lookup(code)
            .ok_or_else(|| RateError::UnsupportedCurrency(code.to_string()))?;

        let mut records = Vec::new();
        for url in self.page_urls() {
            let page_records = self.read_page(&url, localized_name).await;
            log::debug!("{} rows for {} on {}", page_records.len(), code, url);
            records.extend(page_records);
        }

        if records.is_empty() {
            return Err(RateError::NotFound(code.to_string()));
        }

        Ok(records
            .into_iter()
            .map(|record| record.with_code(code))
            .collect())
    }

    async fn read_page(&self, url: &str, localized_name: &str) -> Vec<RateRecord> {
        match self.fetch_page(url).await {
            Ok(body) => extract(&body, localized_name),
            Err(e) => {
                log::warn!("Skipping {}: {}", url, e);
                Vec::new()
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<Vec<u8>, RateError> {
        let Some(limit) = self.page_timeout else {
            return self.fetcher.fetch(url).await;
        };
        tokio::time::timeout(limit, self.fetcher.fetch(url))
            .await
            .map_err(|_| RateError::Timeout {
                url: url.to_string(),
                millis: limit.as_millis(),
            })?
    }
}
