use image::{imageops, RgbaImage};

use crate::settings::SettingsError;

/// Upper bound on resampled pixels, and so on text grid cells.
pub const MAX_GRID_CELLS: u64 = 1 << 22;

/// Output text grid size derived from the source image and a column count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetGeometry {
    pub columns: u32,
    pub rows: u32,
}

impl TargetGeometry {
    /// Preserves the source aspect ratio: `rows = floor(columns * H / W)`.
    pub fn derive(
        columns: u32,
        source_width: u32,
        source_height: u32,
    ) -> Result<Self, SettingsError> {
        if columns == 0 {
            return Err(SettingsError::ZeroWidth);
        }

        let rows = u64::from(columns) * u64::from(source_height) / u64::from(source_width.max(1));
        if rows == 0 {
            return Err(SettingsError::DegenerateHeight {
                width: columns,
                source_width,
                source_height,
            });
        }

        let too_large = SettingsError::GridTooLarge { columns, rows, max: MAX_GRID_CELLS };
        match u64::from(columns).checked_mul(rows) {
            Some(cells) if cells <= MAX_GRID_CELLS => {},
            _ => return Err(too_large),
        }
        let rows = u32::try_from(rows).map_err(|_| too_large)?;

        Ok(Self { columns, rows })
    }
}

/// Rescales `image` to `columns` pixels wide, keeping its aspect ratio.
pub fn resample(image: &RgbaImage, columns: u32) -> Result<RgbaImage, SettingsError> {
    let geometry = TargetGeometry::derive(columns, image.width(), image.height())?;
    Ok(imageops::resize(
        image,
        geometry.columns,
        geometry.rows,
        imageops::FilterType::CatmullRom,
    ))
}
