//! Exchange metadata acquisition (cold path)
//!
//! Loads the `exchangeInfo` document from a local cache file, or fetches it
//! from the exchange REST API and persists it as the new cache. Called once
//! per generation run - NOT in hot path.

use crate::artifacts::StagedFile;
use crate::core::ExchangeInfo;
use crate::infrastructure::config::SourceConfig;
use crate::infrastructure::retry::RetryPolicy;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Binance spot exchange info endpoint
pub const DEFAULT_EXCHANGE_INFO_URL: &str = "https://api.binance.com/api/v3/exchangeInfo";

/// Exchange metadata source with a cache file
pub struct ExchangeInfoSource {
    client: reqwest::Client,
    url: String,
    cache_path: PathBuf,
    retry: RetryPolicy,
}

impl ExchangeInfoSource {
    /// Create source with explicit endpoint and cache location
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self::with_timeout(url, cache_path, Duration::from_secs(10))
    }

    pub fn with_timeout(url: impl Into<String>, cache_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .user_agent("hft-symbols/0.1")
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            url: url.into(),
            cache_path: cache_path.into(),
            retry: RetryPolicy::default_network(),
        }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        let mut source = Self::with_timeout(
            config.exchange_info_url.clone(),
            config.cache_path.clone(),
            Duration::from_secs(config.timeout_secs),
        );
        source.retry = RetryPolicy::new(config.max_attempts, 250, 5_000, 0.2);
        source
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Load exchange metadata
    ///
    /// The cache file is authoritative when present, unless `refresh` is set;
    /// otherwise the document is fetched and the cache rewritten.
    pub async fn load(&self, refresh: bool) -> Result<ExchangeInfo, SourceError> {
        if !refresh && self.cache_path.exists() {
            tracing::info!("Loading cached exchange info from {}", self.cache_path.display());
            return load_cached(&self.cache_path);
        }

        tracing::info!("Fetching exchange info from {}", self.url);
        let body = self
            .retry
            .retry_async(|attempt| {
                if attempt > 0 {
                    tracing::warn!("Retrying exchange info fetch (attempt {})", attempt + 1);
                }
                self.fetch_once()
            })
            .await?;

        let info = parse_exchange_info(&body)?;
        tracing::info!("Received {} symbols from exchange", info.symbols.len());

        StagedFile::write(&self.cache_path, body.as_bytes())
            .and_then(StagedFile::commit)
            .map_err(SourceError::Io)?;
        tracing::info!("Saved exchange info to {}", self.cache_path.display());

        Ok(info)
    }

    async fn fetch_once(&self) -> Result<String, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Http(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))
    }
}

/// Read and parse a cached exchange info document
pub fn load_cached(path: &Path) -> Result<ExchangeInfo, SourceError> {
    let contents = std::fs::read_to_string(path).map_err(SourceError::Io)?;
    parse_exchange_info(&contents)
}

/// Parse an exchange info document
pub fn parse_exchange_info(json: &str) -> Result<ExchangeInfo, SourceError> {
    serde_json::from_str(json).map_err(|e| SourceError::Malformed(e.to_string()))
}

/// Source data errors - fatal to a generation run
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Malformed exchange info: {0}")]
    Malformed(String),

    #[error("Malformed symbol: {0:?}")]
    MalformedSymbol(String),

    #[error("Cache IO error: {0}")]
    Io(#[source] std::io::Error),
}
