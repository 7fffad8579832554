//! Response DTOs for the cache service API
//!
//! Defines the structure of service response bodies the client parses.

use serde::{Deserialize, Serialize};

/// Response body for the cache info endpoint (GET /caches/:cache)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheInfo {
    /// Cache name
    pub cache: String,
    /// Number of entries stored in the cache
    pub size: u64,
}

impl CacheInfo {
    /// Creates a new CacheInfo
    pub fn new(cache: impl Into<String>, size: u64) -> Self {
        Self {
            cache: cache.into(),
            size,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Extracts the error message from a response body.
    ///
    /// Falls back to the raw body text when it is not an error document.
    pub fn message_from_body(body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => parsed.error,
            Err(_) => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_info_deserialize() {
        let info: CacheInfo = serde_json::from_str(r#"{"cache":"users","size":12}"#).unwrap();
        assert_eq!(info, CacheInfo::new("users", 12));
    }

    #[test]
    fn test_error_response_serialize() {
        let response = ErrorResponse::new("Cache not found");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("Cache not found"));
    }

    #[test]
    fn test_message_from_body() {
        assert_eq!(
            ErrorResponse::message_from_body(r#"{"error":"disk full"}"#),
            "disk full"
        );
        assert_eq!(
            ErrorResponse::message_from_body("  upstream timeout\n"),
            "upstream timeout"
        );
    }
}
