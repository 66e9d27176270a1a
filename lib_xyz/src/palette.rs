use std::collections::HashMap;

use thiserror::Error;

use crate::codec::format::PALETTE_LEN;

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Image has more than 256 colors")]
    TooManyColors,
}

/// Result of palette construction: a table padded to exactly 256 entries
/// and one index per input pixel.
pub struct IndexedPixels {
    pub palette: Vec<[u8; 3]>,
    pub indices: Vec<u8>,
    /// How many leading palette entries are real colors; the rest is
    /// black padding the index plane never references.
    pub color_count: usize,
}

/// Builds a palette over row-major RGB triples.
///
/// Indices are assigned in strict first-occurrence order starting at 0,
/// so the same pixel sequence always yields the same table. The scan
/// rejects the input the moment a 257th distinct color appears.
///
/// # Errors
/// - Returns `PaletteError::TooManyColors` if more than 256 distinct
///   RGB colors are found
pub fn build_palette(
    pixels: impl IntoIterator<Item = [u8; 3]>,
) -> Result<IndexedPixels, PaletteError> {
    let mut color_to_index: HashMap<[u8; 3], u8> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::new();

    for color in pixels {
        if let Some(&index) = color_to_index.get(&color) {
            indices.push(index);
        } else {
            if palette.len() >= PALETTE_LEN {
                return Err(PaletteError::TooManyColors);
            }

            let index = palette.len() as u8;
            palette.push(color);
            color_to_index.insert(color, index);
            indices.push(index);
        }
    }

    let color_count = palette.len();
    palette.resize(PALETTE_LEN, [0, 0, 0]);

    Ok(IndexedPixels {
        palette,
        indices,
        color_count,
    })
}
