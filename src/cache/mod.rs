//! Cache Module
//!
//! Typed cache handles, the value envelope, version tokens and the payload
//! codec.

pub mod codec;
mod handle;
mod value;
mod version;


// Re-export public types
pub use handle::CacheHandle;
pub use value::CacheValue;
pub use version::Version;
