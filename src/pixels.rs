//! Image file decode into a flat RGBA buffer, and grayscale PNG encode.

use std::path::Path;

use image::{GrayImage, ImageFormat};
use log::debug;

use crate::error::ConvertError;

/// Flat 8-bit RGBA pixel buffer in row-major scan order.
///
/// Produced by [`read_image`] and consumed by the mapping pass; each pixel
/// occupies four interleaved bytes.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Color channels of pixel `i` in scan order.
    pub fn rgb(&self, i: usize) -> (u8, u8, u8) {
        let base = i * 4;
        (self.data[base], self.data[base + 1], self.data[base + 2])
    }
}

/// Decode an image file into a normalized 8-bit RGBA buffer.
///
/// Palette, 16-bit, grayscale and grayscale-with-alpha sources are all
/// expanded to interleaved RGBA here, so downstream passes never branch on
/// the source color type.
pub fn read_image(path: &Path) -> Result<PixelBuffer, ConvertError> {
    let decoded = image::open(path).map_err(ConvertError::Decode)?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptyImage);
    }
    debug!(
        "decoded {} into {}x{} RGBA ({} bytes)",
        path.display(),
        width,
        height,
        rgba.as_raw().len()
    );
    Ok(PixelBuffer {
        width,
        height,
        data: rgba.into_raw(),
    })
}

/// Encode a single-channel W×H byte buffer as an 8-bit grayscale PNG.
///
/// The output is always grayscale PNG, whatever the path extension; color
/// from the forward direction is not reconstructed.
pub fn write_grayscale(
    path: &Path,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Result<(), ConvertError> {
    let expected = width as usize * height as usize;
    let got = pixels.len();
    let img = GrayImage::from_raw(width, height, pixels)
        .ok_or(ConvertError::BufferSize { expected, got })?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(ConvertError::Encode)?;
    debug!("wrote {}x{} grayscale PNG to {}", width, height, path.display());
    Ok(())
}
