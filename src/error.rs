//! Error types for the cache client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::cache::Version;

// == Client Error Enum ==
/// Unified error type for the cache client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The (cache, key) pair does not exist on the service
    #[error("Key not found: {cache}/{key}")]
    NotFound { cache: String, key: String },

    /// A conditional write or delete carried a stale version
    #[error("Version conflict on {cache}/{key}: expected version {expected}")]
    VersionConflict {
        cache: String,
        key: String,
        expected: Version,
    },

    /// The key cannot be used as a URL path segment
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// The cache name cannot be used as a URL path segment
    #[error("Invalid cache name: {0:?}")]
    InvalidCacheName(String),

    /// Connection, timeout or body transfer failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an unexpected status code
    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The service answered with a response we cannot interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The payload could not be serialized
    #[error("Failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The payload did not match the handle's payload type
    #[error("Failed to decode payload: {0}")]
    Decode(#[source] serde_json::Error),
}

// == Error Kind ==
/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    VersionConflict,
    InvalidKey,
    /// Transport, protocol or payload failure
    Service,
}

impl ClientError {
    /// Returns the kind of failure this error represents.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::NotFound { .. } => ErrorKind::NotFound,
            ClientError::VersionConflict { .. } => ErrorKind::VersionConflict,
            ClientError::InvalidKey(_) | ClientError::InvalidCacheName(_) => ErrorKind::InvalidKey,
            ClientError::Http(_)
            | ClientError::Status { .. }
            | ClientError::InvalidResponse(_)
            | ClientError::Encode(_)
            | ClientError::Decode(_) => ErrorKind::Service,
        }
    }

    /// Returns true if the error is a version conflict.
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::VersionConflict
    }

    /// Returns true if the error reports a missing entry.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache client.
pub type Result<T> = std::result::Result<T, ClientError>;
