//! Wire models for the cache service API
//!
//! This module defines the DTOs (Data Transfer Objects) exchanged with the
//! service that are not user payloads.

pub mod node;
pub mod responses;

// Re-export commonly used types
pub use node::Node;
pub use responses::{CacheInfo, ErrorResponse};
