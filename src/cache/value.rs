//! Cache Value Module
//!
//! Defines the (payload, version) envelope returned by versioned reads.

use crate::cache::Version;

// == Cache Value ==
/// A decoded payload together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheValue<T> {
    value: T,
    version: Version,
}

impl<T> CacheValue<T> {
    pub(crate) fn new(value: T, version: Version) -> Self {
        Self { value, version }
    }

    /// The decoded payload.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Version to pass to a conditional write or delete.
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Version) {
        (self.value, self.version)
    }
}
