pub mod redis_store;
#[cfg(test)]
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;

pub use redis_store::RedisStore;

/// Logical partition (database index) inside the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Strings,
    Sets,
    Geo,
}

impl Namespace {
    /// Database index this namespace is pinned to
    pub const fn index(self) -> i64 {
        match self {
            Namespace::Strings => 1,
            Namespace::Sets => 4,
            Namespace::Geo => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Namespace::Strings => "strings",
            Namespace::Sets => "sets",
            Namespace::Geo => "geo",
        }
    }
}

/// Operations available on a single namespace of the store
///
/// Every handle is bound to exactly one [`Namespace`] for its whole lifetime;
/// none of these methods can reach keys in another partition.
#[async_trait]
pub trait NamespaceStore: Send + Sync {
    /// The namespace this handle operates on
    fn namespace(&self) -> Namespace;

    /// Round-trip to the store to prove the connection is alive
    async fn ping(&self) -> Result<()>;

    /// All keys matching a glob-style pattern
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;

    async fn exists(&self, key: &str) -> Result<bool>;

    /// Raw string value at `key`, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Upsert `value` at `key`; `false` when the store did not acknowledge the write
    async fn set(&self, key: &str, value: &str) -> Result<bool>;

    /// Remove `key`; `true` when something was deleted
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Remove every key in the namespace
    async fn flush(&self) -> Result<()>;

    /// Add (or move) `member` in the geospatial set `set`
    ///
    /// Returns `true` when the member was newly added.
    async fn geo_add(&self, set: &str, longitude: f64, latitude: f64, member: &str)
        -> Result<bool>;
}

/// Shareable handle to one namespace
pub type StoreHandle = Arc<dyn NamespaceStore>;

/// One handle per namespace, opened at startup and held for the process lifetime
#[derive(Clone)]
pub struct StoreHandles {
    pub strings: StoreHandle,
    pub sets: StoreHandle,
    pub geo: StoreHandle,
}

impl StoreHandles {
    /// Connect every namespace handle to the configured Redis server
    pub async fn connect(config: &Config) -> Result<Self> {
        tracing::info!("Connecting to Redis at: {}", config.redis_url);

        let strings = RedisStore::connect(&config.redis_url, Namespace::Strings).await?;
        let sets = RedisStore::connect(&config.redis_url, Namespace::Sets).await?;
        let geo = RedisStore::connect(&config.redis_url, Namespace::Geo).await?;

        Ok(Self {
            strings: Arc::new(strings),
            sets: Arc::new(sets),
            geo: Arc::new(geo),
        })
    }

    pub fn all(&self) -> [&StoreHandle; 3] {
        [&self.strings, &self.sets, &self.geo]
    }
}
