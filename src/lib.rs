//! A WHATWG URL parser and manipulation library.
//!
//! The crate parses a string (optionally against a base URL) with the
//! byte-driven state machine of the WHATWG URL Standard, keeps the result
//! as one canonical serialization plus per-component ranges, and layers a
//! typed accessor surface, a fluent builder, RFC 3986-style reference
//! resolution and syntax normalization, and percent-encoding primitives
//! on top.
//!
//! ```
//! use urlkit::Url;
//!
//! let url = Url::parse("HTTPS://User@Example.COM:443/a/../b?q=1#top", None)?;
//! assert_eq!(url.as_str(), "https://User@example.com/b?q=1#top");
//! assert_eq!(url.scheme(), "https");
//! assert_eq!(url.port(), None); // default port stripped
//! # Ok::<_, urlkit::ParseError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod builder;
mod error;
mod host;
mod ipv4;
mod ipv6;
mod normalize;
mod parser;
mod resolve;
mod search_params;
mod unicode;
mod url;
mod url_components;
mod validation;

// Public API
pub use builder::UrlBuilder;
pub use error::{ParseError, ParseErrorKind, Result};
pub use parser::State;
pub use search_params::UrlSearchParams;
pub use unicode::percent_encode::{
    EncodeSet, EncodedByte, encode_byte, is_in_set, is_percent_encoded, percent_decode,
    percent_encode,
};
pub use url::{QueryPairs, Url};
pub use validation::ValidationError;
