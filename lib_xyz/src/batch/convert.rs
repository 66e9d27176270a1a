use std::fs;
use std::io;
use std::path::Path;

use image::ExtendedColorType;
use log::debug;
use thiserror::Error;

use crate::codec::{decode, encode, DecodeError, EncodeError};
use crate::quantize::{quantize, QuantizeError};

#[derive(Error, Debug)]
pub enum JobError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Quantize(#[from] QuantizeError),

    #[error("Image dimensions {0}x{1} exceed the 65535 limit of the XYZ format")]
    DimensionsTooLarge(u32, u32),
}

pub fn xyz_to_png(input: &Path, output: &Path) -> Result<(), JobError> {
    let bytes = fs::read(input)?;
    let decoded = decode(&bytes)?;
    let rgba = decoded.to_rgba();
    image::save_buffer(
        output,
        &rgba,
        decoded.width as u32,
        decoded.height as u32,
        ExtendedColorType::Rgba8,
    )?;
    debug!("Converted {} -> {}", input.display(), output.display());
    Ok(())
}

pub fn png_to_xyz(input: &Path, output: &Path) -> Result<(), JobError> {
    let raster = image::open(input)?.to_rgba8();
    let (width, height) = raster.dimensions();

    let (width, height) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(JobError::DimensionsTooLarge(width, height)),
    };

    let encoded = encode(width, height, raster.as_raw())?;
    fs::write(output, encoded)?;
    debug!("Converted {} -> {}", input.display(), output.display());
    Ok(())
}

pub fn to_256_colors(input: &Path, output: &Path) -> Result<(), JobError> {
    let raster = image::open(input)?.to_rgba8();
    let reduced = quantize(&raster)?;
    reduced.save(output)?;
    debug!("Quantized {} -> {}", input.display(), output.display());
    Ok(())
}
