use std::env;
use std::time::Duration;

use crate::coingecko::COINGECKO_API_BASE as DEFAULT_COINGECKO_URL;

const DEFAULT_APP_VERSION: &str = "2.0.0";

/// Which quote cache sits in front of the price fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    Off,
    Memory,
    Redis,
}

impl CacheMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" | "false" => Some(CacheMode::Off),
            "memory" => Some(CacheMode::Memory),
            "redis" => Some(CacheMode::Redis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub app_version: String,

    // Persistence (optional, in-memory storage when unset)
    pub database_url: Option<String>,

    // Quote cache
    pub redis_url: Option<String>,
    pub quote_cache: CacheMode,
    pub cache_ttl_secs: u64,
    pub cache_timeout_ms: u64,

    // Upstream market data
    pub coingecko_api_url: String,
    pub coingecko_api_key: Option<String>,
    pub upstream_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let redis_url = non_empty_var("REDIS_URL");

        // Redis when a URL is configured, otherwise no cache unless asked for.
        let quote_cache = match non_empty_var("QUOTE_CACHE") {
            Some(raw) => CacheMode::parse(&raw)
                .ok_or_else(|| anyhow::anyhow!("QUOTE_CACHE must be one of off, memory, redis"))?,
            None if redis_url.is_some() => CacheMode::Redis,
            None => CacheMode::Off,
        };

        if quote_cache == CacheMode::Redis && redis_url.is_none() {
            anyhow::bail!("QUOTE_CACHE=redis requires REDIS_URL");
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            app_version: env::var("APP_VERSION").unwrap_or_else(|_| DEFAULT_APP_VERSION.into()),

            database_url: non_empty_var("DATABASE_URL"),

            redis_url,
            quote_cache,
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .unwrap_or(60),
            cache_timeout_ms: env::var("CACHE_TIMEOUT_MS")
                .unwrap_or_else(|_| "500".into())
                .parse()
                .unwrap_or(500),

            coingecko_api_url: env::var("COINGECKO_API_URL")
                .unwrap_or_else(|_| DEFAULT_COINGECKO_URL.into()),
            coingecko_api_key: non_empty_var("COINGECKO_API_KEY"),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),
        })
    }

    /// Returns true if holdings and alerts live in Postgres.
    pub fn is_persistent(&self) -> bool {
        self.database_url.is_some()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            app_version: DEFAULT_APP_VERSION.into(),
            database_url: None,
            redis_url: None,
            quote_cache: CacheMode::Off,
            cache_ttl_secs: 60,
            cache_timeout_ms: 500,
            coingecko_api_url: DEFAULT_COINGECKO_URL.into(),
            coingecko_api_key: None,
            upstream_timeout_secs: 10,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_mode_parsing() {
        assert_eq!(CacheMode::parse("memory"), Some(CacheMode::Memory));
        assert_eq!(CacheMode::parse(" Redis "), Some(CacheMode::Redis));
        assert_eq!(CacheMode::parse("off"), Some(CacheMode::Off));
        assert_eq!(CacheMode::parse("memcached"), None);
    }

    #[test]
    fn test_default_config_is_in_memory_without_cache() {
        let config = AppConfig::default();
        assert!(!config.is_persistent());
        assert_eq!(config.quote_cache, CacheMode::Off);
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
    }
}
