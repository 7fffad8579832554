//! Key Encoder Module
//!
//! Percent-encodes cache names and keys so each one fits in a single URL
//! path segment.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Bytes left as-is: ASCII alphanumerics plus `-`, `_` and `~`.
///
/// `.` is escaped as well so that no encoded key can turn into a dot segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

// == Encoding Error ==
/// The key cannot be represented as a path segment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyEncodingError {
    #[error("key is empty")]
    Empty,

    #[error("key {0:?} is a dot segment")]
    DotSegment(String),
}

// == Encode ==
/// Percent-encodes `key` as UTF-8 for use as one URL path segment.
///
/// Distinct byte sequences always produce distinct encodings.
///
/// # Errors
/// Returns [`KeyEncodingError`] for the empty key and for `.` / `..`, which
/// URL normalization would collapse even when escaped.
pub fn encode(key: &str) -> Result<String, KeyEncodingError> {
    match key {
        "" => Err(KeyEncodingError::Empty),
        "." | ".." => Err(KeyEncodingError::DotSegment(key.to_string())),
        _ => Ok(utf8_percent_encode(key, PATH_SEGMENT).to_string()),
    }
}
