//! Page fetching for the quotation listing.

pub mod headers;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::errors::RateError;
use headers::browser_headers;

/// Source of raw page bodies.
///
/// Implementations must report every failure as a [`RateError`] and never
/// panic; the aggregator decides what a failed page is worth.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url` as raw bytes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, RateError>;
}

/// HTTP client for the Bank of China quotation pages.
#[derive(Clone)]
pub struct BocClient {
    client: Client,
}

impl BocClient {
    /// Create a client with the browser header bundle.
    ///
    /// Without a `timeout` the transport default applies.
    pub fn new(timeout: Option<Duration>) -> Result<Self, RateError> {
        let mut builder = Client::builder().default_headers(browser_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for BocClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, RateError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
