// Surface configuration: size, colors and the ink model constants.
// Visual: these numbers decide how big the pad is and how the ink looks.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted surface edge in pixels.
pub const MAX_DIMENSION: usize = 8192;

/// Everything a `SignatureSurface` needs to know up front.
///
/// Loaded from JSON where every field is optional; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface width in pixels.
    pub width: usize,
    /// Surface height in pixels.
    pub height: usize,
    /// Ink color, 0x00RRGGBB.
    pub ink_color: u32,
    /// Paper color, 0x00RRGGBB. A blank signature image is entirely this color.
    pub background_color: u32,
    /// Thinnest line the pen can draw (pixels).
    pub width_min: f32,
    /// Thickest line the pen can draw (pixels).
    pub width_max: f32,
    /// Low-pass factor for width changes in [0,1]; higher = slower reaction.
    pub width_smoothing: f32,
    /// Pointer speeds (px/s) below this are treated as this.
    pub velocity_min: f32,
    /// Pointer speeds (px/s) above this are treated as this.
    pub velocity_max: f32,
    /// Moves longer than this (pixels) are curve-interpolated.
    pub quadratic_tolerance: f32,
    /// Spacing (pixels) of interpolated points along a curve.
    pub segment_spacing: f32,
    /// Moves shorter than this (pixels) are dropped as jitter.
    pub min_distance: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 240,
            ink_color: 0x00_1A_1A_2E,
            background_color: 0x00_FF_FF_FF,
            width_min: 1.5,
            width_max: 8.0,
            width_smoothing: 0.5,
            velocity_min: 20.0,
            velocity_max: 5000.0,
            quadratic_tolerance: 3.0,
            segment_spacing: 1.5,
            min_distance: 1.0,
        }
    }
}

impl SurfaceConfig {
    /// Defaults with a different surface size.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Read a JSON config file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the ink model or the renderer cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "surface size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(Error::Config(format!(
                "surface size {}x{} exceeds the {MAX_DIMENSION} pixel limit",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(Error::Config("surface pixel count overflows".into()));
        }
        if self.ink_color > 0x00FF_FFFF || self.background_color > 0x00FF_FFFF {
            return Err(Error::Config("colors must be 0x00RRGGBB".into()));
        }
        if !(self.width_min > 0.0 && self.width_min <= self.width_max) {
            return Err(Error::Config(format!(
                "need 0 < width_min <= width_max, got {} / {}",
                self.width_min, self.width_max
            )));
        }
        if !(0.0..=1.0).contains(&self.width_smoothing) {
            return Err(Error::Config(format!(
                "width_smoothing must be in [0,1], got {}",
                self.width_smoothing
            )));
        }
        if !(self.velocity_min >= 0.0 && self.velocity_min < self.velocity_max) {
            return Err(Error::Config(format!(
                "need 0 <= velocity_min < velocity_max, got {} / {}",
                self.velocity_min, self.velocity_max
            )));
        }
        if !(self.segment_spacing > 0.0) {
            return Err(Error::Config("segment_spacing must be positive".into()));
        }
        if self.min_distance < 0.0 || self.quadratic_tolerance < self.min_distance {
            return Err(Error::Config(
                "need 0 <= min_distance <= quadratic_tolerance".into(),
            ));
        }
        Ok(())
    }
}
