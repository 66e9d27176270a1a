use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::{debug, error, info};
use thiserror::Error;

use super::format::{XyzImage, MAGIC_HEADER, PALETTE_BYTES};
use crate::palette::{build_palette, PaletteError};

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("Pixel buffer length {actual} does not match {width}x{height} RGBA")]
    InvalidBufferLength {
        width: u16,
        height: u16,
        actual: usize,
    },
    #[error("Failed to compress image data: {0}")]
    Compression(#[source] io::Error),
}

/// Encodes row-major RGBA pixel data into an XYZ container.
///
/// Alpha is dropped before palette construction; two pixels that differ
/// only in alpha map to the same palette entry. The compression level is
/// fixed, so the same pixels always produce the same bytes.
pub fn encode(width: u16, height: u16, rgba_data: &[u8]) -> Result<Vec<u8>, EncodeError> {
    info!("Starting encoding of {}x{} image", width, height);

    let pixel_count = width as usize * height as usize;
    if rgba_data.len() != pixel_count * 4 {
        error!(
            "RGBA buffer length {} does not match {}x{}",
            rgba_data.len(),
            width,
            height
        );
        return Err(EncodeError::InvalidBufferLength {
            width,
            height,
            actual: rgba_data.len(),
        });
    }

    // Step 1: build the palette over the RGB triples, alpha stripped
    let indexed = build_palette(rgba_data.chunks_exact(4).map(|p| [p[0], p[1], p[2]]))?;
    debug!("Palette built with {} populated colors", indexed.color_count);

    // Step 2: palette followed by the index plane, as one compressible payload
    let mut payload = Vec::with_capacity(PALETTE_BYTES + pixel_count);
    for color in &indexed.palette {
        payload.extend_from_slice(color);
    }
    payload.extend_from_slice(&indexed.indices);

    // Step 3: header stays uncompressed, everything after is one zlib block
    let mut encoded_data = Vec::with_capacity(XyzImage::HEADER_SIZE + payload.len() / 2);
    encoded_data.extend_from_slice(&MAGIC_HEADER);
    encoded_data.extend_from_slice(&width.to_le_bytes());
    encoded_data.extend_from_slice(&height.to_le_bytes());

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&payload)
        .map_err(EncodeError::Compression)?;
    let compressed = encoder.finish().map_err(EncodeError::Compression)?;
    debug!(
        "Compressed {} payload bytes down to {}",
        payload.len(),
        compressed.len()
    );
    encoded_data.extend_from_slice(&compressed);

    info!("Encoding process completed successfully");
    Ok(encoded_data)
}
