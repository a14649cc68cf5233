//! Loading encoded bytes into an [`Image`](crate::Image).
//!
//! Reading files, content URIs or gallery entries belongs to the caller; this
//! module only turns a byte buffer (JPEG or PNG) into RGBA pixels, applying
//! the EXIF orientation so the session edits the image as the user sees it.
//!
//! Any failure here is fatal for an editing session: it cannot start without
//! an initial image.

mod decoder;
mod types;

pub use decoder::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation};
