use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use super::{CacheError, QuoteCache};

/// In-process TTL cache for single-instance deployments and tests.
#[derive(Clone)]
pub struct MemoryCache {
    inner: Cache<String, String>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(ttl)
            .build();

        Self { inner }
    }
}

#[async_trait]
impl QuoteCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.inner.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_value_within_ttl() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("crypto:bitcoin", "{}").await.unwrap();

        assert_eq!(cache.get("crypto:bitcoin").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(cache.get("crypto:ethereum").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new(Duration::from_millis(100));
        cache.set("crypto:bitcoin", "{}").await.unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(cache.get("crypto:bitcoin").await.unwrap(), None);
    }
}
