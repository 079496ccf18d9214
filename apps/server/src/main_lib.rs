use std::sync::Arc;

use boc_rates::{BocClient, PageFetcher, RateAggregator};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{cache::ResponseCache, config::Config};

pub struct AppState {
    pub aggregator: Arc<RateAggregator>,
    /// Rendered responses of the rate endpoint, keyed by request URI.
    pub cache: ResponseCache,
}

pub fn init_tracing() {
    let log_format = std::env::var("BOC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = BocClient::new(config.upstream_timeout)?;
    tracing::info!("Reading quotation pages from {}", config.base_url);
    Ok(build_state_with_fetcher(config, Arc::new(client)))
}

/// Assemble the state around any page source.
pub fn build_state_with_fetcher(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Arc<AppState> {
    let aggregator = RateAggregator::new(fetcher)
        .with_base_url(config.base_url.clone())
        .with_page_timeout(config.page_timeout());
    Arc::new(AppState {
        aggregator: Arc::new(aggregator),
        cache: ResponseCache::new(config.cache_ttl, config.cache_capacity),
    })
}
