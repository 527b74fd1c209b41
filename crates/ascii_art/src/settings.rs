use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ascii::color::ColorMode;

pub const WIDTH_STEP: u32 = 20;
pub const MIN_WIDTH: u32 = 60;
pub const MAX_WIDTH: u32 = 400;
pub const FACTOR_STEP: f32 = 0.1;
pub const MIN_FACTOR: f32 = 0.5;
pub const MAX_FACTOR: f32 = 2.0;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("target width must be positive")]
    ZeroWidth,
    #[error("width {width} collapses a {source_width}x{source_height} image to zero rows")]
    DegenerateHeight { width: u32, source_width: u32, source_height: u32 },
    #[error("width {columns} gives a {columns}x{rows} grid, over the {max} cell limit")]
    GridTooLarge { columns: u32, rows: u64, max: u64 },
    #[error("contrast must be a finite, non-negative factor (got {0})")]
    Contrast(f32),
    #[error("brightness must be a finite, non-negative factor (got {0})")]
    Brightness(f32),
}

/// Parameters for one conversion. Missing fields deserialize to defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Columns of the output text grid.
    pub width: u32,
    pub contrast: f32,
    pub brightness: f32,
    pub color_mode: ColorMode,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self { width: 200, contrast: 1.0, brightness: 1.0, color_mode: ColorMode::TrueColor }
    }
}

impl ConversionSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 {
            return Err(SettingsError::ZeroWidth);
        }
        if !self.contrast.is_finite() || self.contrast < 0.0 {
            return Err(SettingsError::Contrast(self.contrast));
        }
        if !self.brightness.is_finite() || self.brightness < 0.0 {
            return Err(SettingsError::Brightness(self.brightness));
        }
        Ok(())
    }

    /// Applies one menu control, keeping values inside the menu's bounds.
    pub fn apply(&mut self, control: SettingsControl) {
        match control {
            SettingsControl::WidthUp => {
                self.width = self.width.saturating_add(WIDTH_STEP).min(MAX_WIDTH);
            },
            SettingsControl::WidthDown => {
                self.width = self.width.saturating_sub(WIDTH_STEP).max(MIN_WIDTH);
            },
            SettingsControl::ContrastUp => self.contrast = step_factor(self.contrast, FACTOR_STEP),
            SettingsControl::ContrastDown => {
                self.contrast = step_factor(self.contrast, -FACTOR_STEP);
            },
            SettingsControl::BrightnessUp => {
                self.brightness = step_factor(self.brightness, FACTOR_STEP);
            },
            SettingsControl::BrightnessDown => {
                self.brightness = step_factor(self.brightness, -FACTOR_STEP);
            },
            SettingsControl::CycleColorMode => self.color_mode = self.color_mode.next(),
            SettingsControl::Reset => *self = Self::default(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Width={}, Contrast={:.1}, Brightness={:.1}, Mode={}",
            self.width, self.contrast, self.brightness, self.color_mode
        )
    }
}

fn step_factor(value: f32, step: f32) -> f32 {
    let stepped = (value + step).clamp(MIN_FACTOR, MAX_FACTOR);
    (stepped * 10.0).round() / 10.0
}

/// Increment, decrement, cycle and reset controls of the settings menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsControl {
    WidthUp,
    WidthDown,
    ContrastUp,
    ContrastDown,
    BrightnessUp,
    BrightnessDown,
    CycleColorMode,
    Reset,
}

impl SettingsControl {
    pub const ALL: [SettingsControl; 8] = [
        SettingsControl::WidthUp,
        SettingsControl::WidthDown,
        SettingsControl::ContrastUp,
        SettingsControl::ContrastDown,
        SettingsControl::BrightnessUp,
        SettingsControl::BrightnessDown,
        SettingsControl::CycleColorMode,
        SettingsControl::Reset,
    ];

    /// Callback tag carried by the menu button.
    pub fn tag(self) -> &'static str {
        match self {
            SettingsControl::WidthUp => "ascii_width_up",
            SettingsControl::WidthDown => "ascii_width_down",
            SettingsControl::ContrastUp => "ascii_contrast_up",
            SettingsControl::ContrastDown => "ascii_contrast_down",
            SettingsControl::BrightnessUp => "ascii_brightness_up",
            SettingsControl::BrightnessDown => "ascii_brightness_down",
            SettingsControl::CycleColorMode => "ascii_color_mode",
            SettingsControl::Reset => "ascii_reset",
        }
    }
}

impl fmt::Display for SettingsControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown settings control `{0}`")]
pub struct UnknownControl(pub String);

impl FromStr for SettingsControl {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|control| control.tag() == s)
            .ok_or_else(|| UnknownControl(s.to_owned()))
    }
}
