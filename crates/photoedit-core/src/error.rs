//! Error type for editing operations.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors reported by transforms and the edit session.
#[derive(Debug, Error)]
pub enum EditError {
    /// A parameter was outside its valid domain. Nothing was changed.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// An image has a zero dimension or a buffer that does not match its
    /// dimensions.
    #[error("Invalid image: {width}x{height} with {len} bytes")]
    InvalidImage { width: u32, height: u32, len: usize },

    /// Undo was requested with nothing to undo.
    #[error("Cannot undo: already at the oldest edit")]
    NoOpPossible,

    /// The session has no image loaded yet.
    #[error("No image loaded")]
    EmptySession,

    /// The source image could not be decoded.
    #[error("Decode failure: {0}")]
    Decode(#[from] DecodeError),

    /// The current image could not be encoded for export.
    #[error("Encode failure: {0}")]
    Encode(#[from] EncodeError),
}

impl EditError {
    /// Shorthand for [`EditError::InvalidParameter`].
    pub fn invalid(name: &'static str, value: f64) -> Self {
        EditError::InvalidParameter { name, value }
    }

    /// True for statuses that are not failures, such as a no-op undo.
    pub fn is_benign(&self) -> bool {
        matches!(self, EditError::NoOpPossible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EditError::invalid("scale", -1.0);
        assert_eq!(err.to_string(), "Invalid parameter scale: -1");

        let err = EditError::from(DecodeError::InvalidFormat);
        assert_eq!(
            err.to_string(),
            "Decode failure: Invalid or unsupported image format"
        );
    }

    #[test]
    fn test_invalid_image_display() {
        let err = EditError::InvalidImage {
            width: 0,
            height: 3,
            len: 0,
        };
        assert_eq!(err.to_string(), "Invalid image: 0x3 with 0 bytes");
    }

    #[test]
    fn test_benign() {
        assert!(EditError::NoOpPossible.is_benign());
        assert!(!EditError::EmptySession.is_benign());
        assert!(!EditError::invalid("ratio", 0.0).is_benign());
    }
}
