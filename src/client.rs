//! Client Module
//!
//! Entry point of the library: owns the transport and hands out typed
//! cache handles.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::api::{CacheApi, HttpApiClient};
use crate::cache::CacheHandle;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::Node;

// == Cache Client ==
/// Connection to one cache service.
///
/// # Example
/// ```no_run
/// use oblivion_client::{CacheClient, ClientConfig};
///
/// let client = CacheClient::new(&ClientConfig::from_env())?;
/// let sessions = client.cache::<String>("sessions")?;
///
/// let version = sessions.put("user-1", &"token".to_string())?;
/// sessions.put_versioned("user-1", &"rotated".to_string(), version)?;
/// # Ok::<(), oblivion_client::ClientError>(())
/// ```
#[derive(Clone)]
pub struct CacheClient {
    api: Arc<dyn CacheApi>,
}

impl CacheClient {
    // == Constructors ==
    /// Creates a client talking HTTP to the service in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = HttpApiClient::new(config)?;
        info!(base_url = %api.base_url(), "Cache client created");
        Ok(Self::from_api(Arc::new(api)))
    }

    /// Creates a client over any transport, e.g. a [`MemoryApi`](crate::api::MemoryApi).
    pub fn from_api(api: Arc<dyn CacheApi>) -> Self {
        Self { api }
    }

    // == Cache Handles ==
    /// Handle to the cache `name` with payloads of type `T`.
    pub fn cache<T>(&self, name: impl Into<String>) -> Result<CacheHandle<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        CacheHandle::new(name, Arc::clone(&self.api))
    }

    // == Cluster Queries ==
    /// Names of the caches on the service.
    pub fn caches(&self) -> Result<Vec<String>> {
        self.api.caches()
    }

    /// Members of the cache cluster.
    pub fn nodes(&self) -> Result<Vec<Node>> {
        self.api.nodes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryApi;
    use crate::error::ClientError;

    #[test]
    fn test_handles_share_the_transport() {
        let client = CacheClient::from_api(Arc::new(MemoryApi::new()));
        let writer = client.cache::<u32>("scores").unwrap();
        let reader = client.cache::<u32>("scores").unwrap();

        writer.put("alice", &10).unwrap();
        assert_eq!(reader.get("alice").unwrap(), Some(10));
        assert_eq!(client.caches().unwrap(), vec!["scores"]);
    }

    #[test]
    fn test_invalid_cache_name() {
        let client = CacheClient::from_api(Arc::new(MemoryApi::new()));
        assert!(matches!(
            client.cache::<u32>("."),
            Err(ClientError::InvalidCacheName(_))
        ));
    }

    #[test]
    fn test_http_client_construction() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:1");
        assert!(CacheClient::new(&config).is_ok());
    }
}
