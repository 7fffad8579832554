//! Oblivion Client - typed client for the 0blivi0n key-value cache
//!
//! Exposes the cache service's HTTP API as per-cache handles with typed
//! payloads and version-checked (compare-and-swap) writes.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod util;

pub use api::{CacheApi, HttpApiClient, MemoryApi, RawValue};
pub use cache::{CacheHandle, CacheValue, Version};
pub use client::CacheClient;
pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind, Result};
pub use models::Node;
