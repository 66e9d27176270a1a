use std::io::{self, Read};

use flate2::read::ZlibDecoder;
use log::{debug, error, info};
use thiserror::Error;

use super::format::{XyzImage, MAGIC_HEADER, PALETTE_BYTES, PALETTE_LEN};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported file format: missing XYZ1 magic")]
    BadMagic,
    #[error("File too short to hold an XYZ header")]
    TruncatedHeader,
    #[error("Failed to decompress image data: {0}")]
    Decompression(#[source] io::Error),
    #[error("Decompressed data too short for the 768-byte palette")]
    TruncatedPalette,
    #[error("Decompressed index plane too short: expected {expected} bytes, got {actual}")]
    TruncatedIndexPlane { expected: usize, actual: usize },
}

/// Decodes an XYZ container into its palette and index plane.
///
/// Bytes in the decompressed stream beyond the declared `width * height`
/// indices are ignored, matching what existing writers of the format emit.
pub fn decode(encoded_data: &[u8]) -> Result<XyzImage, DecodeError> {
    // Check the header and magic number
    if encoded_data.len() < XyzImage::MAGIC_SIZE || !encoded_data.starts_with(&MAGIC_HEADER) {
        error!("Invalid format or missing magic number in header");
        return Err(DecodeError::BadMagic);
    }
    debug!("Magic number validated successfully");

    if encoded_data.len() < XyzImage::HEADER_SIZE {
        error!("Data ends before the dimension fields");
        return Err(DecodeError::TruncatedHeader);
    }

    // Width and height are the only uncompressed fields after the magic
    let width = u16::from_le_bytes([encoded_data[4], encoded_data[5]]);
    let height = u16::from_le_bytes([encoded_data[6], encoded_data[7]]);
    debug!("Image dimensions read: width={} height={}", width, height);

    // Everything after the header is one zlib block
    let mut decompressed = Vec::new();
    ZlibDecoder::new(&encoded_data[XyzImage::HEADER_SIZE..])
        .read_to_end(&mut decompressed)
        .map_err(|e| {
            error!("Decompression failed: {}", e);
            DecodeError::Decompression(e)
        })?;
    debug!("Decompressed {} bytes", decompressed.len());

    if decompressed.len() < PALETTE_BYTES {
        error!("Decompressed block cannot hold a full palette");
        return Err(DecodeError::TruncatedPalette);
    }

    // 256 RGB triples, in table order
    let palette: Vec<[u8; 3]> = decompressed[..PALETTE_BYTES]
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    debug_assert_eq!(palette.len(), PALETTE_LEN);

    let pixel_count = width as usize * height as usize;
    let plane = &decompressed[PALETTE_BYTES..];
    if plane.len() < pixel_count {
        error!(
            "Index plane truncated: expected {} bytes, got {}",
            pixel_count,
            plane.len()
        );
        return Err(DecodeError::TruncatedIndexPlane {
            expected: pixel_count,
            actual: plane.len(),
        });
    }
    let indices = plane[..pixel_count].to_vec();

    info!("Decoded {}x{} XYZ image", width, height);
    Ok(XyzImage::new(width, height, palette, indices))
}
