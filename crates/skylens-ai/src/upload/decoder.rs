//! Byte-level validation and decoding of uploads.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::{ImageError, ImageFormat, UploadedImage};

/// Validate and decode an uploaded image.
///
/// The size bound is checked before any decoding work. The format is
/// detected from the magic bytes, never from a file name.
pub fn decode_image(bytes: Vec<u8>, max_size_bytes: u64) -> Result<UploadedImage, ImageError> {
    let size = bytes.len() as u64;
    if size > max_size_bytes {
        return Err(ImageError::FileTooLarge {
            size,
            max: max_size_bytes,
        });
    }
    if bytes.is_empty() {
        return Err(ImageError::InvalidImage("file is empty".into()));
    }

    let format = match image::guess_format(&bytes) {
        Ok(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
        Ok(image::ImageFormat::Png) => ImageFormat::Png,
        Ok(other) => {
            return Err(ImageError::InvalidImage(format!(
                "unsupported format {other:?}; expected JPEG or PNG"
            )))
        }
        Err(_) => {
            return Err(ImageError::InvalidImage(
                "unrecognized file format; expected JPEG or PNG".into(),
            ))
        }
    };

    let decoded = image::load_from_memory_with_format(&bytes, to_codec_format(format))
        .map_err(|e| ImageError::InvalidImage(e.to_string()))?;

    debug!(
        ?format,
        width = decoded.width(),
        height = decoded.height(),
        size,
        "decoded upload"
    );

    Ok(UploadedImage {
        width: decoded.width(),
        height: decoded.height(),
        bytes,
        format,
    })
}

/// Read an image file from disk and validate it.
///
/// Only regular files are accepted. Oversized files are rejected from
/// their metadata, and the read itself never takes more than
/// `max_size_bytes + 1` bytes.
pub fn load_image_file(path: &Path, max_size_bytes: u64) -> Result<UploadedImage, ImageError> {
    let io_err =
        |e: std::io::Error| ImageError::InvalidImage(format!("failed to read {}: {e}", path.display()));

    let metadata = std::fs::metadata(path).map_err(io_err)?;
    if !metadata.is_file() {
        return Err(ImageError::InvalidImage(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_size_bytes {
        return Err(ImageError::FileTooLarge {
            size: metadata.len(),
            max: max_size_bytes,
        });
    }

    let file = File::open(path).map_err(io_err)?;
    // The file may have grown since the metadata was read.
    let bytes = read_bounded(file, max_size_bytes).map_err(io_err)?;
    decode_image(bytes, max_size_bytes)
}

/// Read at most `max_size_bytes + 1` bytes, enough for `decode_image` to
/// see that an over-long input is too large.
pub(crate) fn read_bounded(reader: impl Read, max_size_bytes: u64) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(max_size_bytes.saturating_add(1))
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn to_codec_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
    }
}
