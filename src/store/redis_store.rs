use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::geo::Coord;
use redis::{AsyncCommands, IntoConnectionInfo, Value};

use super::{Namespace, NamespaceStore};

/// Redis-backed namespace handle
///
/// Wraps a tokio `ConnectionManager` whose connection info has the namespace's
/// database index baked in, so every command (including FLUSHDB) targets that
/// partition only. The manager reconnects on its own; it is cheap to clone.
#[derive(Clone)]
pub struct RedisStore {
    namespace: Namespace,
    conn: ConnectionManager,
}

impl RedisStore {
    /// Open a connection to `url`, selecting the database index of `namespace`
    ///
    /// Any database index already present in `url` is overridden.
    pub async fn connect(url: &str, namespace: Namespace) -> Result<Self> {
        let mut info = url
            .into_connection_info()
            .with_context(|| format!("Invalid Redis URL: {}", url))?;
        info.redis.db = namespace.index();

        let client = redis::Client::open(info).context("Failed to create Redis client")?;
        let conn = ConnectionManager::new(client)
            .await
            .with_context(|| format!("Failed to connect to Redis database {}", namespace.index()))?;

        tracing::info!(
            "Connected {} namespace to Redis database {}",
            namespace.name(),
            namespace.index()
        );

        Ok(Self { namespace, conn })
    }
}

#[async_trait]
impl NamespaceStore for RedisStore {
    fn namespace(&self) -> Namespace {
        self.namespace
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Failed to ping Redis")?;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn
            .keys(pattern)
            .await
            .with_context(|| format!("Failed to list keys matching '{}'", pattern))?;
        tracing::debug!("Found {} keys in {} namespace", keys.len(), self.namespace.name());
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        conn.exists(key)
            .await
            .with_context(|| format!("Failed to check existence of key {}", key))
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .with_context(|| format!("Failed to read key {}", key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let reply: Value = conn
            .set(key, value)
            .await
            .with_context(|| format!("Failed to write key {}", key))?;

        let acknowledged = match reply {
            Value::Okay => true,
            Value::SimpleString(ref status) => status == "OK",
            _ => false,
        };
        tracing::debug!("SET {} acknowledged: {}", key, acknowledged);
        Ok(acknowledged)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn
            .del(key)
            .await
            .with_context(|| format!("Failed to delete key {}", key))?;
        Ok(removed > 0)
    }

    async fn flush(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB")
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to flush database {}", self.namespace.index()))?;
        tracing::debug!("Flushed {} namespace", self.namespace.name());
        Ok(())
    }

    async fn geo_add(
        &self,
        set: &str,
        longitude: f64,
        latitude: f64,
        member: &str,
    ) -> Result<bool> {
        let mut conn = self.conn.clone();
        let added: i64 = conn
            .geo_add(set, (Coord::lon_lat(longitude, latitude), member))
            .await
            .with_context(|| format!("Failed to add '{}' to geo set {}", member, set))?;
        Ok(added > 0)
    }
}
