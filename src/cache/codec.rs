//! Payload Codec Module
//!
//! Converts typed payloads to and from the JSON text stored by the service.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ClientError, Result};

/// Serializes `value` to JSON text.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(ClientError::Encode)
}

/// Deserializes JSON text into `T`.
///
/// Content whose shape does not match `T` is a [`ClientError::Decode`].
pub fn decode<T: DeserializeOwned>(content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(ClientError::Decode)
}
