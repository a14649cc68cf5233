//! Export encoding.
//!
//! Persisting the bytes (gallery, file system) is left to the caller.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
