use image::RgbaImage;

use super::{gradient::GlyphRamp, grid::TextGrid};

pub struct GlyphMapper {
    ramp: GlyphRamp,
}

impl GlyphMapper {
    pub fn new(ramp: GlyphRamp) -> Self {
        Self { ramp }
    }

    /// Maps every pixel of an achromatic grid to one glyph, reading the red
    /// channel as brightness.
    pub fn map_luminance(&self, gray: &RgbaImage) -> TextGrid {
        let chars = gray.pixels().map(|pixel| self.ramp.char_at(self.ramp.index_for(pixel.0[0])));
        TextGrid::new(gray.width(), gray.height(), chars.collect())
    }
}
