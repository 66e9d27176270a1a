use image::{Rgba, RgbaImage};
use log::{debug, info};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuantizeError {
    #[error("Quantization failed: {0}")]
    Quantization(#[from] imagequant::Error),
}

/// Reduces an RGBA image to at most 256 distinct colors using an adaptive
/// palette. The result keeps the input's dimensions and pixel order; the
/// palette itself is an implementation detail of the quantizer.
pub fn quantize(image: &RgbaImage) -> Result<RgbaImage, QuantizeError> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let bitmap: Vec<imagequant::RGBA> = image
        .pixels()
        .map(|p| imagequant::RGBA {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        })
        .collect();

    let mut liq = imagequant::new();
    liq.set_speed(5)?;

    let mut liq_image = liq.new_image(&bitmap[..], width, height, 0.0)?;
    let mut result = liq.quantize(&mut liq_image)?;
    result.set_dithering_level(1.0)?;

    let (palette, pixels) = result.remapped(&mut liq_image)?;
    debug!("Quantizer produced a {}-color palette", palette.len());

    let mut reduced = RgbaImage::new(image.width(), image.height());
    for (dst, index) in reduced.pixels_mut().zip(pixels) {
        let color = palette[index as usize];
        *dst = Rgba([color.r, color.g, color.b, color.a]);
    }

    info!("Quantized {}x{} image to 256 colors", width, height);
    Ok(reduced)
}
