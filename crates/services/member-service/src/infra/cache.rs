//! Cache backends.
//!
//! Values are stored as JSON strings so that the [`CacheManager`] trait stays
//! object safe; typed access lives in the caching aspect.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use common::{AppResult, CacheConfig};
use dashmap::DashMap;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Key/value cache with prefix invalidation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CacheManager: Send + Sync {
    /// Get a cached JSON value.
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a JSON value for `ttl`.
    async fn set_raw(&self, key: &str, value: String, ttl: Duration) -> AppResult<()>;

    /// Remove every key starting with `prefix`, returning how many were removed.
    async fn remove_by_prefix(&self, prefix: &str) -> AppResult<u64>;

    /// Check backend connectivity.
    async fn ping(&self) -> AppResult<()>;
}

// =============================================================================
// Redis
// =============================================================================

/// Redis cache with connection pooling.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis.
    pub async fn connect(config: &CacheConfig) -> Result<Self, RedisError> {
        let client = Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheManager for RedisCache {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String, ttl: Duration) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await?;
        Ok(())
    }

    async fn remove_by_prefix(&self, prefix: &str) -> AppResult<u64> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.keys(format!("{}*", prefix)).await?;

        if keys.is_empty() {
            return Ok(0);
        }

        let removed: u64 = conn.del(&keys).await?;
        Ok(removed)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

// =============================================================================
// In-process
// =============================================================================

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process cache for single-node deployments and tests.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| e.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheManager for MemoryCache {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        // Expired entries are dropped on read
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        Ok(None)
    }

    async fn set_raw(&self, key: &str, value: String, ttl: Duration) -> AppResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn remove_by_prefix(&self, prefix: &str) -> AppResult<u64> {
        let mut removed = 0;
        self.entries.retain(|key, _| {
            let keep = !key.starts_with(prefix);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_cache_get_and_set() {
        let cache = MemoryCache::new();
        cache
            .set_raw("member_service.get_all", "[]".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(
            cache.get_raw("member_service.get_all").await.unwrap(),
            Some("[]".to_string())
        );
        assert_eq!(cache.get_raw("member_service.missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_expired_entries_are_misses() {
        let cache = MemoryCache::new();
        cache
            .set_raw("trainer_service.get_all", "[]".to_string(), Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(cache.get_raw("trainer_service.get_all").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_memory_cache_remove_by_prefix_spares_other_services() {
        let cache = MemoryCache::new();
        let ttl = Duration::from_secs(60);
        for key in [
            "member_service.get_all",
            "member_service.get_member_details",
            "trainer_service.get_all",
        ] {
            cache.set_raw(key, "[]".to_string(), ttl).await.unwrap();
        }

        let removed = cache.remove_by_prefix("member_service.get").await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get_raw("trainer_service.get_all").await.unwrap().is_some());
    }
}
