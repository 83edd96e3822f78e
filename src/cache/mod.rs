//! Fixed-TTL key-value cache placed in front of the price fetcher.
//!
//! The store owns expiry: callers never check staleness themselves. Every
//! operation is bounded by a timeout so a slow cache cannot hold a request.

pub mod memory;
pub mod redis;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{AppConfig, CacheMode};

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait QuoteCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key` with the cache's fixed TTL.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    async fn ping(&self) -> Result<(), CacheError>;

    fn backend(&self) -> &'static str;
}

/// Cache key for a single-coin quote.
pub fn quote_key(coin: &str) -> String {
    format!("crypto:{coin}")
}

/// Build the cache selected by configuration, or `None` when caching is off.
pub fn from_config(config: &AppConfig) -> anyhow::Result<Option<Arc<dyn QuoteCache>>> {
    let cache: Arc<dyn QuoteCache> = match config.quote_cache {
        CacheMode::Off => return Ok(None),
        CacheMode::Memory => Arc::new(MemoryCache::new(config.cache_ttl())),
        CacheMode::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("REDIS_URL must be set for the redis cache"))?;
            Arc::new(RedisCache::new(url, config.cache_ttl(), config.cache_timeout())?)
        }
    };

    tracing::info!(
        backend = cache.backend(),
        ttl_secs = config.cache_ttl_secs,
        "Quote cache enabled"
    );
    Ok(Some(cache))
}

pub(crate) async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, CacheError>
where
    F: Future<Output = Result<T, CacheError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| CacheError::Timeout(limit))?
}
