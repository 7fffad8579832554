//! API Routes
//!
//! URL templates for every cache service endpoint.

use std::fmt::Display;

use crate::util::UrlTemplate;

/// Parsed endpoint templates, relative to the service base URL.
///
/// # Endpoints
/// - `/caches` - cache names
/// - `/caches/:cache` - cache info (size)
/// - `/caches/:cache/keys` - key listing (GET) and flush (DELETE)
/// - `/caches/:cache/keys/:key` - entry operations
/// - `/caches/:cache/keys/:key?version=:v` - conditional entry operations
/// - `/nodes` - cluster members
#[derive(Debug, Clone)]
pub struct Routes {
    caches: UrlTemplate,
    cache: UrlTemplate,
    keys: UrlTemplate,
    key: UrlTemplate,
    versioned_key: UrlTemplate,
    nodes: UrlTemplate,
}

impl Routes {
    pub fn new() -> Self {
        Self {
            caches: UrlTemplate::new("/caches"),
            cache: UrlTemplate::new("/caches/%s"),
            keys: UrlTemplate::new("/caches/%s/keys"),
            key: UrlTemplate::new("/caches/%s/keys/%s"),
            versioned_key: UrlTemplate::new("/caches/%s/keys/%s?version=%s"),
            nodes: UrlTemplate::new("/nodes"),
        }
    }

    // Cache names and keys are expected to be percent-encoded already.

    pub fn caches(&self) -> String {
        self.caches.build(&[])
    }

    pub fn cache(&self, cache: &str) -> String {
        self.cache.build(&[&cache])
    }

    pub fn keys(&self, cache: &str) -> String {
        self.keys.build(&[&cache])
    }

    pub fn key(&self, cache: &str, key: &str) -> String {
        self.key.build(&[&cache, &key])
    }

    pub fn versioned_key(&self, cache: &str, key: &str, version: impl Display) -> String {
        self.versioned_key.build(&[&cache, &key, &version])
    }

    pub fn nodes(&self) -> String {
        self.nodes.build(&[])
    }
}

impl Default for Routes {
    fn default() -> Self {
        Self::new()
    }
}
