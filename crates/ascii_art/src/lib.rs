mod ascii;
mod image_pipeline;
mod raster;
mod settings;

use log::debug;

pub use ascii::{
    color::{sample_colors, ColorMode, UnknownColorMode},
    gradient::{GlyphRamp, GLYPH_RAMP},
    grid::{CellGlyph, GlyphGrid, TextGrid},
    mapping::GlyphMapper,
};
pub use image_pipeline::{
    adjust::{apply_contrast_and_brightness, mean_luminance, to_grayscale},
    loader::decode,
    resize::{resample, TargetGeometry, MAX_GRID_CELLS},
};
pub use raster::{
    encode_png, rasterize, CanvasGeometry, RenderError, BACKGROUND, CELL_HEIGHT, CELL_WIDTH,
    MAX_CANVAS_PIXELS,
};
pub use settings::{ConversionSettings, SettingsControl, SettingsError, UnknownControl};

#[derive(Debug, thiserror::Error)]
pub enum AsciiError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
    #[error("failed to render ascii art: {0}")]
    Render(#[from] RenderError),
}

/// Result of one conversion.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub text: TextGrid,
    pub glyphs: GlyphGrid,
    /// Dimensions of the decoded input image.
    pub source_width: u32,
    pub source_height: u32,
    /// The rendered glyph image, PNG encoded.
    pub png: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct AsciiConverter;

impl AsciiConverter {
    /// Decodes `bytes` and renders them as colored ASCII art.
    pub fn convert(
        &self,
        bytes: &[u8],
        settings: &ConversionSettings,
    ) -> Result<Conversion, AsciiError> {
        settings.validate()?;
        let image = decode(bytes)?;
        self.convert_image(&image, settings)
    }

    /// Runs the pipeline on an already decoded image.
    pub fn convert_image(
        &self,
        image: &image::RgbaImage,
        settings: &ConversionSettings,
    ) -> Result<Conversion, AsciiError> {
        settings.validate()?;
        let (source_width, source_height) = image.dimensions();

        let resized = resample(image, settings.width)?;
        debug!(
            "resampled {}x{} to {}x{}",
            source_width,
            source_height,
            resized.width(),
            resized.height()
        );

        let adjusted =
            apply_contrast_and_brightness(&resized, settings.contrast, settings.brightness);
        let gray = to_grayscale(&adjusted);
        let text = GlyphMapper::new(GLYPH_RAMP).map_luminance(&gray);

        let colors = sample_colors(&adjusted, text.width, text.height, settings.color_mode);
        let glyphs = GlyphGrid::colorize(&text, &colors);

        let canvas = rasterize(&glyphs, source_width, source_height)?;
        let png = encode_png(&canvas)?;

        Ok(Conversion { text, glyphs, source_width, source_height, png })
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn uniform_gray_renders_uniform_glyphs() {
        let image = RgbaImage::from_pixel(100, 100, Rgba([128, 128, 128, 255]));
        let settings = ConversionSettings {
            width: 10,
            contrast: 1.0,
            brightness: 1.0,
            color_mode: ColorMode::Grayscale,
        };

        let conversion = AsciiConverter.convert_image(&image, &settings).unwrap();

        let lines: Vec<String> = conversion.text.rows().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|line| line == "nnnnnnnnnn"));
        assert!(conversion.glyphs.cells.iter().all(|cell| cell.fg == [128, 128, 128]));
    }

    #[test]
    fn text_grid_matches_resampled_geometry() {
        let image =
            RgbaImage::from_fn(64, 48, |x, y| Rgba([(x * 4) as u8, (y * 5) as u8, 90, 255]));
        let settings = ConversionSettings { width: 32, ..Default::default() };

        let conversion = AsciiConverter.convert_image(&image, &settings).unwrap();

        assert_eq!(conversion.text.height, 24);
        assert!(conversion.text.rows().all(|line| line.chars().count() == 32));
        assert_eq!((conversion.source_width, conversion.source_height), (64, 48));
    }

    #[test]
    fn invalid_settings_abort_before_decoding() {
        let settings = ConversionSettings { width: 0, ..Default::default() };
        let err = AsciiConverter.convert(b"not an image", &settings).unwrap_err();
        assert!(matches!(err, AsciiError::InvalidSettings(SettingsError::ZeroWidth)));
    }

    #[test]
    fn undecodable_bytes_fail() {
        let err =
            AsciiConverter.convert(b"not an image", &ConversionSettings::default()).unwrap_err();
        assert!(matches!(err, AsciiError::Decode(_)));
    }
}
