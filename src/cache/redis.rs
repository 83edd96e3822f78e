use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use super::{with_timeout, CacheError, QuoteCache};

/// Redis-backed cache. Entries are written with `SET .. EX <ttl>`.
///
/// One `ConnectionManager` is shared by every operation; it is created on
/// first use and reconnects by itself after a dropped connection.
#[derive(Clone)]
pub struct RedisCache {
    client: redis::Client,
    conn: Arc<OnceCell<ConnectionManager>>,
    ttl: Duration,
    op_timeout: Duration,
}

impl RedisCache {
    /// Parses the URL only; no connection is made until first use.
    pub fn new(url: &str, ttl: Duration, op_timeout: Duration) -> Result<Self, CacheError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: Arc::new(OnceCell::new()),
            ttl,
            op_timeout,
        })
    }

    /// A handle to the shared connection. A failed connect leaves the cell
    /// empty so the next call tries again.
    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl QuoteCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        with_timeout(self.op_timeout, async {
            let mut conn = self.connection().await?;
            let value: Option<String> = conn.get(key).await?;
            Ok(value)
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let ttl_secs = self.ttl.as_secs().max(1);
        with_timeout(self.op_timeout, async {
            let mut conn = self.connection().await?;
            let _: () = conn.set_ex(key, value, ttl_secs).await?;
            Ok(())
        })
        .await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        with_timeout(self.op_timeout, async {
            let mut conn = self.connection().await?;
            let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
