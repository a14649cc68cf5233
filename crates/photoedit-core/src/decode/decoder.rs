//! Byte-buffer decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{DecodeError, Orientation};
use crate::Image;

/// Decode JPEG or PNG bytes into an RGBA [`Image`], applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` if the result has a zero dimension.
pub fn decode_image(bytes: &[u8]) -> Result<Image, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    finish(apply_orientation(img, orientation))
}

/// Decode bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Image, DecodeError> {
    finish(decode_dynamic(bytes)?)
}

/// Read the EXIF orientation from encoded bytes.
///
/// Returns `Orientation::Normal` when there is no EXIF block.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn finish(img: DynamicImage) -> Result<Image, DecodeError> {
    let rgba = img.into_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    debug!(width = rgba.width(), height = rgba.height(), "Decoded image");
    Ok(Image::from_rgba_image(rgba))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
