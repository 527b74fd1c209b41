use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Policy deciding the display color of a glyph from its sampled pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    TrueColor,
    Mono,
    Green,
    Blue,
    Red,
    Cyan,
    Magenta,
    Yellow,
    #[default]
    Grayscale,
}

impl ColorMode {
    /// Modes in menu cycling order.
    pub const ALL: [ColorMode; 9] = [
        ColorMode::TrueColor,
        ColorMode::Mono,
        ColorMode::Green,
        ColorMode::Blue,
        ColorMode::Red,
        ColorMode::Cyan,
        ColorMode::Magenta,
        ColorMode::Yellow,
        ColorMode::Grayscale,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ColorMode::TrueColor => "true_color",
            ColorMode::Mono => "mono",
            ColorMode::Green => "green",
            ColorMode::Blue => "blue",
            ColorMode::Red => "red",
            ColorMode::Cyan => "cyan",
            ColorMode::Magenta => "magenta",
            ColorMode::Yellow => "yellow",
            ColorMode::Grayscale => "grayscale",
        }
    }

    /// Unknown tags fall back to grayscale.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&mode| mode == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn apply(self, [r, g, b]: [u8; 3]) -> [u8; 3] {
        let sum = u16::from(r) + u16::from(g) + u16::from(b);
        let avg = (sum / 3) as u8;

        match self {
            ColorMode::TrueColor => [r, g, b],
            // avg < 128 on the exact average.
            ColorMode::Mono if sum < 384 => [0, 0, 0],
            ColorMode::Mono => [255, 255, 255],
            ColorMode::Green => [0, avg, 0],
            ColorMode::Blue => [0, 0, avg],
            ColorMode::Red => [avg, 0, 0],
            ColorMode::Cyan => [0, avg, avg],
            ColorMode::Magenta => [avg, 0, avg],
            ColorMode::Yellow => [avg, avg, 0],
            ColorMode::Grayscale => [avg, avg, avg],
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown color mode `{0}`")]
pub struct UnknownColorMode(pub String);

impl FromStr for ColorMode {
    type Err = UnknownColorMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.tag() == s)
            .ok_or_else(|| UnknownColorMode(s.to_owned()))
    }
}

/// Samples a display color for every cell of a `columns x rows` text grid from
/// the tone-adjusted, still colored, pixel grid.
pub fn sample_colors(source: &RgbaImage, columns: u32, rows: u32, mode: ColorMode) -> Vec<[u8; 3]> {
    let (src_width, src_height) = source.dimensions();
    let mut colors = Vec::with_capacity(columns as usize * rows as usize);

    for y in 0..rows {
        let orig_y = (u64::from(y) * u64::from(src_height) / u64::from(rows)) as u32;
        for x in 0..columns {
            let orig_x = (u64::from(x) * u64::from(src_width) / u64::from(columns)) as u32;
            let [r, g, b, _] = source.get_pixel(orig_x, orig_y).0;
            colors.push(mode.apply([r, g, b]));
        }
    }

    colors
}
