//! Cache Handle Module
//!
//! Typed, per-cache façade over a [`CacheApi`] transport.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::api::CacheApi;
use crate::cache::{codec, CacheValue, Version};
use crate::error::{ClientError, Result};
use crate::util::key_encoder;

// == Cache Handle ==
/// Handle to one named cache whose payloads are of type `T`.
///
/// Keys may be any [`Display`] value and are always used in their
/// `to_string()` form. Payloads are stored as JSON.
///
/// The handle holds no mutable state: every method is a single blocking
/// round trip through the transport and nothing is cached or retried. Clone
/// it freely and share it between threads.
pub struct CacheHandle<T> {
    name: String,
    api: Arc<dyn CacheApi>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> CacheHandle<T>
where
    T: Serialize + DeserializeOwned,
{
    // == Constructor ==
    /// Binds `name` and payload type `T` to a transport.
    ///
    /// # Errors
    /// [`ClientError::InvalidCacheName`] if `name` cannot be a URL path segment.
    pub fn new(name: impl Into<String>, api: Arc<dyn CacheApi>) -> Result<Self> {
        let name = name.into();
        if key_encoder::encode(&name).is_err() {
            return Err(ClientError::InvalidCacheName(name));
        }

        Ok(Self {
            name,
            api,
            _payload: PhantomData,
        })
    }

    /// Name of the cache this handle is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    // == Version ==
    /// Current version of `key`.
    ///
    /// # Errors
    /// [`ClientError::NotFound`] if the key is absent.
    pub fn version<K: Display>(&self, key: K) -> Result<Version> {
        let key = normalize_key(key)?;
        self.api.version(&self.name, &key)
    }

    // == Get ==
    /// Decoded value of `key`, or `None` if it is absent.
    pub fn get<K: Display>(&self, key: K) -> Result<Option<T>> {
        Ok(self.get_value(key)?.map(CacheValue::into_value))
    }

    /// Decoded value of `key` together with its version, or `None` if absent.
    ///
    /// The version can be passed to [`put_versioned`](Self::put_versioned) or
    /// [`delete_versioned`](Self::delete_versioned).
    pub fn get_value<K: Display>(&self, key: K) -> Result<Option<CacheValue<T>>> {
        let key = normalize_key(key)?;

        match self.api.get(&self.name, &key)? {
            Some(raw) => {
                let value = codec::decode(&raw.content)?;
                Ok(Some(CacheValue::new(value, raw.version)))
            }
            None => {
                debug!(cache = %self.name, %key, "Cache miss");
                Ok(None)
            }
        }
    }

    // == Put ==
    /// Stores `value` under `key` regardless of its current version.
    ///
    /// Returns the version the service assigned to the write.
    pub fn put<K: Display>(&self, key: K, value: &T) -> Result<Version> {
        let key = normalize_key(key)?;
        let content = codec::encode(value)?;
        self.api.put(&self.name, &key, &content)
    }

    /// Stores `value` under `key` only if the entry is still at `version`.
    ///
    /// # Errors
    /// [`ClientError::VersionConflict`] if the entry moved on (or is gone);
    /// the stored value is left untouched.
    pub fn put_versioned<K: Display>(
        &self,
        key: K,
        value: &T,
        version: Version,
    ) -> Result<Version> {
        let key = normalize_key(key)?;
        let content = codec::encode(value)?;
        self.api.put_versioned(&self.name, &key, &content, version)
    }

    // == Delete ==
    /// Removes `key`.
    ///
    /// # Errors
    /// [`ClientError::NotFound`] if the key is absent.
    pub fn delete<K: Display>(&self, key: K) -> Result<()> {
        let key = normalize_key(key)?;
        self.api.delete(&self.name, &key)
    }

    /// Removes `key` only if the entry is still at `version`.
    ///
    /// # Errors
    /// [`ClientError::VersionConflict`] on a stale version,
    /// [`ClientError::NotFound`] if the key is absent.
    pub fn delete_versioned<K: Display>(&self, key: K, version: Version) -> Result<()> {
        let key = normalize_key(key)?;
        self.api.delete_versioned(&self.name, &key, version)
    }

    // == Namespace Operations ==
    /// Every key currently stored in the cache, in no particular order.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.api.keys(&self.name)
    }

    /// Removes every entry of the cache.
    pub fn flush(&self) -> Result<()> {
        debug!(cache = %self.name, "Flushing cache");
        self.api.flush(&self.name)
    }

    /// Number of entries in the cache.
    pub fn size(&self) -> Result<u64> {
        self.api.size(&self.name)
    }
}

impl<T> Clone for CacheHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            api: Arc::clone(&self.api),
            _payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for CacheHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheHandle")
            .field("name", &self.name)
            .field("payload", &std::any::type_name::<T>())
            .finish()
    }
}

/// Canonical string form of a key, rejected early if it cannot be sent.
fn normalize_key<K: Display>(key: K) -> Result<String> {
    let key = key.to_string();
    match key_encoder::encode(&key) {
        Ok(_) => Ok(key),
        Err(_) => Err(ClientError::InvalidKey(key)),
    }
}
