//! Draws a colored glyph grid back onto a pixel canvas.
//!
//! Glyphs come from an 8x8 bitmap font stretched to 8x16 and placed inside a
//! nominal 10x20 cell. The canvas keeps the aspect ratio of the original
//! image, so row pitch is stretched or squeezed to fill its height exactly.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage};
use log::debug;

use crate::ascii::grid::GlyphGrid;

pub const CELL_WIDTH: u32 = 10;
pub const CELL_HEIGHT: u32 = 20;
pub const BACKGROUND: Rgb<u8> = Rgb([32, 32, 32]);
/// Upper bound on canvas pixels; keeps the RGB buffer near 200 MiB.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

const GLYPH_SCALE_X: u32 = 1;
const GLYPH_SCALE_Y: u32 = 2;
const GLYPH_INSET_X: u32 = (CELL_WIDTH - 8 * GLYPH_SCALE_X) / 2;
const GLYPH_INSET_Y: u32 = (CELL_HEIGHT - 8 * GLYPH_SCALE_Y) / 2;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("rendered canvas would be empty ({width}x{height})")]
    EmptyCanvas { width: u64, height: u64 },
    #[error("rendered canvas of {width}x{height} exceeds the canvas pixel limit")]
    CanvasTooLarge { width: u64, height: u64 },
    #[error("failed to encode rendered image: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasGeometry {
    pub width: u32,
    pub height: u32,
    /// Vertical pitch between text rows after scaling to the canvas height.
    pub row_height: f64,
}

impl CanvasGeometry {
    pub fn derive(
        columns: u32,
        rows: u32,
        source_width: u32,
        source_height: u32,
    ) -> Result<Self, RenderError> {
        let width = u64::from(CELL_WIDTH) * u64::from(columns);
        // Height past u64 is reported as u64::MAX.
        let Some(height) = width
            .checked_mul(u64::from(source_height))
            .map(|scaled| scaled / u64::from(source_width.max(1)))
        else {
            return Err(RenderError::CanvasTooLarge { width, height: u64::MAX });
        };

        if width == 0 || height == 0 || rows == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }

        let too_large = RenderError::CanvasTooLarge { width, height };
        match width.checked_mul(height) {
            Some(pixels) if pixels <= MAX_CANVAS_PIXELS => {},
            _ => return Err(too_large),
        }
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(too_large);
        };

        let scale_factor = f64::from(height) / (f64::from(CELL_HEIGHT) * f64::from(rows));
        let row_height = f64::from(CELL_HEIGHT) * scale_factor;

        Ok(Self { width, height, row_height })
    }
}

/// Renders `glyphs` on a dark canvas sized from the original image dimensions.
pub fn rasterize(
    glyphs: &GlyphGrid,
    source_width: u32,
    source_height: u32,
) -> Result<RgbImage, RenderError> {
    let geometry =
        CanvasGeometry::derive(glyphs.width, glyphs.height, source_width, source_height)?;
    debug!(
        "rasterizing {}x{} glyphs onto {}x{} canvas (row pitch {:.2})",
        glyphs.width, glyphs.height, geometry.width, geometry.height, geometry.row_height
    );

    let mut canvas = RgbImage::from_pixel(geometry.width, geometry.height, BACKGROUND);

    for (y, row) in glyphs.rows().enumerate() {
        let top = (y as f64 * geometry.row_height).floor() as u32;
        for (x, cell) in row.iter().enumerate() {
            let left = x as u32 * CELL_WIDTH + GLYPH_INSET_X;
            draw_glyph(&mut canvas, cell.ch, left, top + GLYPH_INSET_Y, Rgb(cell.fg));
        }
    }

    Ok(canvas)
}

pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ColorType::Rgb8,
    )?;
    Ok(bytes)
}

fn draw_glyph(canvas: &mut RgbImage, ch: char, left: u32, top: u32, color: Rgb<u8>) {
    let Some(bitmap) = BASIC_FONTS.get(ch) else {
        return;
    };

    for (row, &bits) in bitmap.iter().enumerate() {
        for col in 0..8u32 {
            if (bits >> col) & 1 == 0 {
                continue;
            }

            for dy in 0..GLYPH_SCALE_Y {
                for dx in 0..GLYPH_SCALE_X {
                    let px = left + col * GLYPH_SCALE_X + dx;
                    let py = top + row as u32 * GLYPH_SCALE_Y + dy;
                    if px < canvas.width() && py < canvas.height() {
                        canvas.put_pixel(px, py, color);
                    }
                }
            }
        }
    }
}
