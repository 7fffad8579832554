//! URL Utilities
//!
//! Key encoding and URL templating used by the HTTP transport.

pub mod key_encoder;
pub mod url_template;

pub use key_encoder::{encode, KeyEncodingError};
pub use url_template::UrlTemplate;
