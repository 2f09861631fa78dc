//! Infrastructure layer - database and cache backends.

pub mod cache;
mod db;
pub mod migrations;

pub use cache::{CacheManager, MemoryCache, RedisCache};
#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockCacheManager;
pub use db::Database;
pub use migrations::Migrator;
