use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use boc_rates::{CONTINUATION_PAGES, DEFAULT_BASE_URL};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Outbound per-page timeout; `None` derives it from `request_timeout`.
    pub upstream_timeout: Option<Duration>,
    pub base_url: String,
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 6666)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_secs(60),
            upstream_timeout: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("BOC_LISTEN_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("Invalid BOC_LISTEN_ADDR: {}", addr))?,
            Err(_) => defaults.listen_addr,
        };
        let cors_allow = std::env::var("BOC_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout =
            env_millis("BOC_REQUEST_TIMEOUT_MS").unwrap_or(defaults.request_timeout);
        let upstream_timeout = env_millis("BOC_UPSTREAM_TIMEOUT_MS");
        let base_url = std::env::var("BOC_BASE_URL").unwrap_or(defaults.base_url);
        let cache_ttl = std::env::var("BOC_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);
        let cache_capacity = std::env::var("BOC_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.cache_capacity);

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout,
            upstream_timeout,
            base_url,
            cache_ttl,
            cache_capacity,
        })
    }

    /// Deadline for one listing page.
    ///
    /// Unless set explicitly, it is `request_timeout` split across every page
    /// plus one share of headroom, so a hanging upstream still ends in a
    /// regular envelope before the request deadline.
    pub fn page_timeout(&self) -> Duration {
        let shares = u32::from(CONTINUATION_PAGES) + 2;
        self.upstream_timeout.unwrap_or(self.request_timeout / shares)
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
}
