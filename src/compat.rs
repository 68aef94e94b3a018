/// Compatibility layer for `std`/`no_std` builds.
///
/// Everything below `alloc` that the crate needs is re-exported here so the
/// rest of the code can import from one place regardless of the feature set.
#[cfg(feature = "std")]
pub use std::{
    borrow::Cow,
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};

#[cfg(not(feature = "std"))]
pub use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};
