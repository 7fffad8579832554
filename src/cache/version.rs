//! Version Token Module
//!
//! Opaque revision numbers issued by the cache service.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Version ==
/// Revision of one (cache, key) entry, issued by the service on every write.
///
/// Only meaningful together with the entry it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Version assigned to an entry on its first write.
    pub const INITIAL: Version = Version(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Version the service assigns after one more write.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    // == Parse ETag ==
    /// Parses an `ETag` header value such as `"3"`, `W/"3"` or `3`.
    pub fn from_etag(etag: &str) -> Option<Self> {
        let etag = etag.trim();
        let etag = etag.strip_prefix("W/").unwrap_or(etag);
        etag.trim_matches('"').parse().ok().map(Self)
    }

    /// Formats the version as a strong `ETag` header value.
    pub fn to_etag(self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_etag() {
        assert_eq!(Version::from_etag("\"3\""), Some(Version::new(3)));
        assert_eq!(Version::from_etag("W/\"17\""), Some(Version::new(17)));
        assert_eq!(Version::from_etag(" 5 "), Some(Version::new(5)));
        assert_eq!(Version::from_etag("\"abc\""), None);
        assert_eq!(Version::from_etag(""), None);
    }

    #[test]
    fn test_etag_round_trip() {
        let version = Version::new(42);
        assert_eq!(version.to_etag(), "\"42\"");
        assert_eq!(Version::from_etag(&version.to_etag()), Some(version));
    }

    #[test]
    fn test_next_and_display() {
        assert_eq!(Version::INITIAL.next(), Version::new(2));
        assert_eq!(Version::new(9).to_string(), "9");
        assert_eq!(serde_json::to_string(&Version::new(9)).unwrap(), "9");
    }
}
