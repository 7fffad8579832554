//! API Module
//!
//! The transport contract the cache handle talks through, and its
//! implementations.
//!
//! # Implementations
//! - [`HttpApiClient`] - blocking HTTP client for the cache service
//! - [`MemoryApi`] - in-process store with the same version semantics

pub mod http;
pub mod memory;
pub mod routes;

pub use http::HttpApiClient;
pub use memory::MemoryApi;
pub use routes::Routes;

use crate::cache::Version;
use crate::error::Result;
use crate::models::Node;

// == Raw Value ==
/// Undecoded content of an entry with its current version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    /// Serialized payload as stored by the service
    pub content: String,
    /// Version of the entry when it was read
    pub version: Version,
}

impl RawValue {
    pub fn new(content: impl Into<String>, version: Version) -> Self {
        Self {
            content: content.into(),
            version,
        }
    }
}

// == Cache API Trait ==
/// Operations the cache service exposes, per cache name and raw key.
///
/// Names and keys are passed unencoded; implementations that need a wire
/// encoding apply it themselves.
pub trait CacheApi: Send + Sync {
    /// Current version of an entry, or `NotFound`.
    fn version(&self, cache: &str, key: &str) -> Result<Version>;

    /// Content and version of an entry, `None` if it does not exist.
    fn get(&self, cache: &str, key: &str) -> Result<Option<RawValue>>;

    /// Unconditional write, returns the new version.
    fn put(&self, cache: &str, key: &str, content: &str) -> Result<Version>;

    /// Write applied only if the entry is currently at `expected`.
    fn put_versioned(
        &self,
        cache: &str,
        key: &str,
        content: &str,
        expected: Version,
    ) -> Result<Version>;

    /// Unconditional delete; `NotFound` if the entry does not exist.
    fn delete(&self, cache: &str, key: &str) -> Result<()>;

    /// Delete applied only if the entry is currently at `expected`.
    fn delete_versioned(&self, cache: &str, key: &str, expected: Version) -> Result<()>;

    /// All keys stored in the cache, in no particular order.
    fn keys(&self, cache: &str) -> Result<Vec<String>>;

    /// Removes every entry of the cache.
    fn flush(&self, cache: &str) -> Result<()>;

    /// Number of entries in the cache.
    fn size(&self, cache: &str) -> Result<u64>;

    /// Names of the caches known to the service.
    fn caches(&self) -> Result<Vec<String>>;

    /// Cluster members as reported by the service.
    fn nodes(&self) -> Result<Vec<Node>>;
}
