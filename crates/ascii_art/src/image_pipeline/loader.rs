use image::RgbaImage;
use log::debug;

use crate::AsciiError;

/// Decodes any supported still image into an RGBA pixel grid.
///
/// Animated formats yield their first frame.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, AsciiError> {
    let image = image::load_from_memory(bytes).map_err(AsciiError::Decode)?;
    let pixels = image.into_rgba8();
    debug!("decoded source image {}x{}", pixels.width(), pixels.height());
    Ok(pixels)
}
