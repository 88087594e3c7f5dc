//! In-process stand-ins for the store used by handler tests

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use super::{Namespace, NamespaceStore, StoreHandles};

#[derive(Default)]
struct Partition {
    strings: BTreeMap<String, String>,
    geo_sets: BTreeMap<String, BTreeMap<String, (f64, f64)>>,
}

impl Partition {
    fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key) || self.geo_sets.contains_key(key)
    }
}

/// Partitioned in-memory store; clones of one server share the same data
#[derive(Clone, Default)]
pub struct MemoryServer {
    partitions: Arc<Mutex<HashMap<Namespace, Partition>>>,
}

impl MemoryServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self, namespace: Namespace) -> MemoryStore {
        MemoryStore {
            namespace,
            server: self.clone(),
        }
    }

    pub fn handles(&self) -> StoreHandles {
        StoreHandles {
            strings: Arc::new(self.handle(Namespace::Strings)),
            sets: Arc::new(self.handle(Namespace::Sets)),
            geo: Arc::new(self.handle(Namespace::Geo)),
        }
    }

    /// Members of a geospatial set with their `(longitude, latitude)`
    pub fn geo_members(&self, namespace: Namespace, set: &str) -> BTreeMap<String, (f64, f64)> {
        self.with_partition(namespace, |p| p.geo_sets.get(set).cloned().unwrap_or_default())
    }

    fn with_partition<T>(&self, namespace: Namespace, f: impl FnOnce(&mut Partition) -> T) -> T {
        let mut partitions = self
            .partitions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(partitions.entry(namespace).or_default())
    }
}

#[derive(Clone)]
pub struct MemoryStore {
    namespace: Namespace,
    server: MemoryServer,
}

/// Glob match supporting `*` only
fn matches(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or_default();
    let Some(mut rest) = key.strip_prefix(first) else {
        return false;
    };

    let tail: Vec<&str> = parts.collect();
    let Some((last, middle)) = tail.split_last() else {
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

#[async_trait]
impl NamespaceStore for MemoryStore {
    fn namespace(&self) -> Namespace {
        self.namespace
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self.server.with_partition(self.namespace, |p| {
            p.strings
                .keys()
                .chain(p.geo_sets.keys())
                .filter(|key| matches(pattern, key))
                .cloned()
                .collect()
        }))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.server.with_partition(self.namespace, |p| p.contains(key)))
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.server.with_partition(self.namespace, |p| {
            if p.geo_sets.contains_key(key) {
                return Err(anyhow!(
                    "WRONGTYPE Operation against a key holding the wrong kind of value"
                ));
            }
            Ok(p.strings.get(key).cloned())
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<bool> {
        self.server.with_partition(self.namespace, |p| {
            p.geo_sets.remove(key);
            p.strings.insert(key.to_string(), value.to_string());
        });
        Ok(true)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.server.with_partition(self.namespace, |p| {
            p.strings.remove(key).is_some() | p.geo_sets.remove(key).is_some()
        }))
    }

    async fn flush(&self) -> Result<()> {
        self.server.with_partition(self.namespace, |p| *p = Partition::default());
        Ok(())
    }

    async fn geo_add(
        &self,
        set: &str,
        longitude: f64,
        latitude: f64,
        member: &str,
    ) -> Result<bool> {
        self.server.with_partition(self.namespace, |p| {
            if p.strings.contains_key(set) {
                return Err(anyhow!(
                    "WRONGTYPE Operation against a key holding the wrong kind of value"
                ));
            }
            let previous = p
                .geo_sets
                .entry(set.to_string())
                .or_default()
                .insert(member.to_string(), (longitude, latitude));
            Ok(previous.is_none())
        })
    }
}

/// How a [`BrokenStore`] misbehaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every call fails as if the connection dropped
    Unreachable,
    /// Reads succeed with nothing stored; writes are not acknowledged
    RefusesWrites,
}

#[derive(Clone)]
pub struct BrokenStore {
    namespace: Namespace,
    fault: Fault,
}

impl BrokenStore {
    pub fn new(namespace: Namespace, fault: Fault) -> Self {
        Self { namespace, fault }
    }

    pub fn handles(fault: Fault) -> StoreHandles {
        StoreHandles {
            strings: Arc::new(Self::new(Namespace::Strings, fault)),
            sets: Arc::new(Self::new(Namespace::Sets, fault)),
            geo: Arc::new(Self::new(Namespace::Geo, fault)),
        }
    }

    fn check(&self) -> Result<()> {
        match self.fault {
            Fault::Unreachable => Err(anyhow!("Connection refused (os error 111)")),
            Fault::RefusesWrites => Ok(()),
        }
    }
}

#[async_trait]
impl NamespaceStore for BrokenStore {
    fn namespace(&self) -> Namespace {
        self.namespace
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }

    async fn keys(&self, _pattern: &str) -> Result<Vec<String>> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        self.check()?;
        Ok(false)
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<bool> {
        self.check()?;
        Ok(false)
    }

    async fn remove(&self, _key: &str) -> Result<bool> {
        self.check()?;
        Ok(false)
    }

    async fn flush(&self) -> Result<()> {
        self.check()
    }

    async fn geo_add(&self, _set: &str, _lon: f64, _lat: f64, _member: &str) -> Result<bool> {
        self.check()?;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_matching() {
        assert!(matches("*", ""));
        assert!(matches("*", "anything"));
        assert!(matches("user:*", "user:42"));
        assert!(!matches("user:*", "order:42"));
        assert!(matches("*:42", "user:42"));
        assert!(matches("a*c*e", "abcde"));
        assert!(!matches("a*c*e", "abcdf"));
        assert!(matches("exact", "exact"));
        assert!(!matches("exact", "exactly"));
    }

    #[tokio::test]
    async fn test_partitions_are_isolated() {
        let server = MemoryServer::new();
        let strings = server.handle(Namespace::Strings);
        let sets = server.handle(Namespace::Sets);

        strings.set("shared", "a").await.unwrap();
        sets.set("shared", "b").await.unwrap();
        sets.flush().await.unwrap();

        assert_eq!(strings.get("shared").await.unwrap(), Some("a".to_string()));
        assert_eq!(sets.get("shared").await.unwrap(), None);
    }
}
