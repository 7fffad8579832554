//! HTTP Transport
//!
//! Blocking reqwest client speaking the cache service's REST API.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_TYPE, ETAG};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{CacheApi, RawValue, Routes};
use crate::cache::Version;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::{CacheInfo, ErrorResponse, Node};
use crate::util::key_encoder;

// == HTTP API Client ==
/// [`CacheApi`] implementation over HTTP.
///
/// Each call is one request/response round trip on the calling thread.
/// Timeouts come from [`ClientConfig`]; nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    routes: Routes,
}

impl HttpApiClient {
    // == Constructor ==
    /// Creates a client for the service described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            routes: Routes::new(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Request Plumbing ==
    fn send(&self, method: Method, path: &str, body: Option<&str>) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Sending cache request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request.send()?;
        debug!(status = response.status().as_u16(), %url, "Cache response received");
        Ok(response)
    }

    fn entry_path(&self, cache: &str, key: &str) -> Result<String> {
        Ok(self.routes.key(&encode_cache(cache)?, &encode_key(key)?))
    }

    fn versioned_entry_path(&self, cache: &str, key: &str, expected: Version) -> Result<String> {
        Ok(self
            .routes
            .versioned_key(&encode_cache(cache)?, &encode_key(key)?, expected))
    }
}

// == CacheApi Implementation ==
impl CacheApi for HttpApiClient {
    fn version(&self, cache: &str, key: &str) -> Result<Version> {
        let response = self.send(Method::HEAD, &self.entry_path(cache, key)?, None)?;

        match response.status() {
            status if status.is_success() => version_header(&response),
            StatusCode::NOT_FOUND => Err(not_found(cache, key)),
            _ => Err(unexpected(response)),
        }
    }

    fn get(&self, cache: &str, key: &str) -> Result<Option<RawValue>> {
        let response = self.send(Method::GET, &self.entry_path(cache, key)?, None)?;

        match response.status() {
            status if status.is_success() => {
                let version = version_header(&response)?;
                let content = response.text()?;
                Ok(Some(RawValue::new(content, version)))
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(unexpected(response)),
        }
    }

    fn put(&self, cache: &str, key: &str, content: &str) -> Result<Version> {
        let response = self.send(Method::PUT, &self.entry_path(cache, key)?, Some(content))?;

        if response.status().is_success() {
            version_header(&response)
        } else {
            Err(unexpected(response))
        }
    }

    fn put_versioned(
        &self,
        cache: &str,
        key: &str,
        content: &str,
        expected: Version,
    ) -> Result<Version> {
        let path = self.versioned_entry_path(cache, key, expected)?;
        let response = self.send(Method::PUT, &path, Some(content))?;

        match response.status() {
            status if status.is_success() => version_header(&response),
            StatusCode::CONFLICT => Err(conflict(cache, key, expected)),
            StatusCode::NOT_FOUND => Err(not_found(cache, key)),
            _ => Err(unexpected(response)),
        }
    }

    fn delete(&self, cache: &str, key: &str) -> Result<()> {
        let response = self.send(Method::DELETE, &self.entry_path(cache, key)?, None)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(not_found(cache, key)),
            _ => Err(unexpected(response)),
        }
    }

    fn delete_versioned(&self, cache: &str, key: &str, expected: Version) -> Result<()> {
        let path = self.versioned_entry_path(cache, key, expected)?;
        let response = self.send(Method::DELETE, &path, None)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(conflict(cache, key, expected)),
            StatusCode::NOT_FOUND => Err(not_found(cache, key)),
            _ => Err(unexpected(response)),
        }
    }

    fn keys(&self, cache: &str) -> Result<Vec<String>> {
        let path = self.routes.keys(&encode_cache(cache)?);
        read_json(self.send(Method::GET, &path, None)?)
    }

    fn flush(&self, cache: &str) -> Result<()> {
        let path = self.routes.keys(&encode_cache(cache)?);
        let response = self.send(Method::DELETE, &path, None)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(unexpected(response))
        }
    }

    fn size(&self, cache: &str) -> Result<u64> {
        let path = self.routes.cache(&encode_cache(cache)?);
        let info: CacheInfo = read_json(self.send(Method::GET, &path, None)?)?;
        Ok(info.size)
    }

    fn caches(&self) -> Result<Vec<String>> {
        read_json(self.send(Method::GET, &self.routes.caches(), None)?)
    }

    fn nodes(&self) -> Result<Vec<Node>> {
        read_json(self.send(Method::GET, &self.routes.nodes(), None)?)
    }
}

// == Helpers ==
fn encode_cache(cache: &str) -> Result<String> {
    key_encoder::encode(cache).map_err(|_| ClientError::InvalidCacheName(cache.to_string()))
}

fn encode_key(key: &str) -> Result<String> {
    key_encoder::encode(key).map_err(|_| ClientError::InvalidKey(key.to_string()))
}

fn not_found(cache: &str, key: &str) -> ClientError {
    ClientError::NotFound {
        cache: cache.to_string(),
        key: key.to_string(),
    }
}

fn conflict(cache: &str, key: &str, expected: Version) -> ClientError {
    debug!(cache, key, %expected, "Conditional request rejected");
    ClientError::VersionConflict {
        cache: cache.to_string(),
        key: key.to_string(),
        expected,
    }
}

/// Reads the entry version from the `ETag` response header.
fn version_header(response: &Response) -> Result<Version> {
    let etag = response
        .headers()
        .get(ETAG)
        .ok_or_else(|| ClientError::InvalidResponse("missing ETag header".to_string()))?;

    etag.to_str()
        .ok()
        .and_then(Version::from_etag)
        .ok_or_else(|| ClientError::InvalidResponse(format!("invalid ETag header: {etag:?}")))
}

/// Consumes a non-success response into a [`ClientError::Status`].
fn unexpected(response: Response) -> ClientError {
    let status = response.status();
    let body = match response.text() {
        Ok(body) => body,
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "Failed to read error response body");
            String::new()
        }
    };
    let message = status_message(status, &body);
    warn!(status = status.as_u16(), %message, "Unexpected cache service response");

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

/// Error message of a failed response, or the status reason when the body is empty.
fn status_message(status: StatusCode, body: &str) -> String {
    let message = ErrorResponse::message_from_body(body);
    if message.is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        message
    }
}

/// Parses a successful JSON response body.
fn read_json<D: DeserializeOwned>(response: Response) -> Result<D> {
    if !response.status().is_success() {
        return Err(unexpected(response));
    }

    let body = response.text()?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::InvalidResponse(format!("malformed response body: {e}")))
}
