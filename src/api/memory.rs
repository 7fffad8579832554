//! In-Memory Transport
//!
//! A [`CacheApi`] backed by process memory, applying the same version rules
//! as the cache service.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::trace;

use crate::api::{CacheApi, RawValue};
use crate::cache::Version;
use crate::error::{ClientError, Result};
use crate::models::Node;

// == Stored Entry ==
#[derive(Debug, Clone)]
struct StoredEntry {
    content: String,
    version: Version,
}

// == Store State ==
#[derive(Debug, Default)]
struct StoreState {
    /// cache name -> key -> entry
    caches: HashMap<String, HashMap<String, StoredEntry>>,
    /// cache name -> key -> last version issued, kept across delete and flush
    issued: HashMap<String, HashMap<String, Version>>,
}

impl StoreState {
    fn current(&self, cache: &str, key: &str) -> Option<Version> {
        self.caches
            .get(cache)
            .and_then(|entries| entries.get(key))
            .map(|entry| entry.version)
    }

    /// Next version for (cache, key), never reusing one issued earlier.
    fn issue(&mut self, cache: &str, key: &str) -> Version {
        let issued = self.issued.entry(cache.to_string()).or_default();
        let version = issued
            .get(key)
            .copied()
            .map_or(Version::INITIAL, Version::next);
        issued.insert(key.to_string(), version);
        version
    }
}

// == Memory API ==
/// In-process cache store implementing [`CacheApi`].
///
/// Versions are per entry: the first write gives [`Version::INITIAL`] and
/// every later write increments it. A deleted or flushed key resumes from
/// its last issued version, so tokens read before the delete stay stale.
/// All checks happen under one lock, so of several conditional writes
/// against the same version exactly one wins.
#[derive(Debug, Default)]
pub struct MemoryApi {
    state: RwLock<StoreState>,
    /// Reported by `nodes()`
    nodes: Vec<Node>,
}

impl MemoryApi {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that reports `nodes` as its cluster.
    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        Self {
            state: RwLock::default(),
            nodes,
        }
    }

    // == Write ==
    fn write(
        &self,
        cache: &str,
        key: &str,
        content: &str,
        expected: Option<Version>,
    ) -> Result<Version> {
        let mut state = self.state.write();

        if let Some(expected) = expected {
            let current = state.current(cache, key);
            if current != Some(expected) {
                trace!(cache, key, %expected, ?current, "Rejecting stale write");
                return Err(conflict(cache, key, expected));
            }
        }

        let version = state.issue(cache, key);
        let entries = state.caches.entry(cache.to_string()).or_default();
        entries.insert(
            key.to_string(),
            StoredEntry {
                content: content.to_string(),
                version,
            },
        );

        Ok(version)
    }

    // == Remove ==
    fn remove(&self, cache: &str, key: &str, expected: Option<Version>) -> Result<()> {
        let mut state = self.state.write();
        let current = state
            .current(cache, key)
            .ok_or_else(|| not_found(cache, key))?;

        if let Some(expected) = expected {
            if current != expected {
                return Err(conflict(cache, key, expected));
            }
        }

        if let Some(entries) = state.caches.get_mut(cache) {
            entries.remove(key);
            if entries.is_empty() {
                state.caches.remove(cache);
            }
        }

        Ok(())
    }
}

// == CacheApi Implementation ==
impl CacheApi for MemoryApi {
    fn version(&self, cache: &str, key: &str) -> Result<Version> {
        self.state
            .read()
            .current(cache, key)
            .ok_or_else(|| not_found(cache, key))
    }

    fn get(&self, cache: &str, key: &str) -> Result<Option<RawValue>> {
        Ok(self
            .state
            .read()
            .caches
            .get(cache)
            .and_then(|entries| entries.get(key))
            .map(|entry| RawValue::new(entry.content.clone(), entry.version)))
    }

    fn put(&self, cache: &str, key: &str, content: &str) -> Result<Version> {
        self.write(cache, key, content, None)
    }

    fn put_versioned(
        &self,
        cache: &str,
        key: &str,
        content: &str,
        expected: Version,
    ) -> Result<Version> {
        self.write(cache, key, content, Some(expected))
    }

    fn delete(&self, cache: &str, key: &str) -> Result<()> {
        self.remove(cache, key, None)
    }

    fn delete_versioned(&self, cache: &str, key: &str, expected: Version) -> Result<()> {
        self.remove(cache, key, Some(expected))
    }

    fn keys(&self, cache: &str) -> Result<Vec<String>> {
        Ok(self
            .state
            .read()
            .caches
            .get(cache)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn flush(&self, cache: &str) -> Result<()> {
        self.state.write().caches.remove(cache);
        Ok(())
    }

    fn size(&self, cache: &str) -> Result<u64> {
        Ok(self
            .state
            .read()
            .caches
            .get(cache)
            .map_or(0, |entries| entries.len() as u64))
    }

    fn caches(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.state.read().caches.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn nodes(&self) -> Result<Vec<Node>> {
        Ok(self.nodes.clone())
    }
}

fn not_found(cache: &str, key: &str) -> ClientError {
    ClientError::NotFound {
        cache: cache.to_string(),
        key: key.to_string(),
    }
}

fn conflict(cache: &str, key: &str, expected: Version) -> ClientError {
    ClientError::VersionConflict {
        cache: cache.to_string(),
        key: key.to_string(),
        expected,
    }
}
