//! Grayscale quantization (RGB -> discrete relief level)
//!
//! Luminance uses the standard luma weights without gamma correction:
//!
//! ```text
//! L = 0.2989 r + 0.5870 g + 0.1140 b
//! level = (N - 1) - floor(L * N / range)
//! ```
//!
//! Dark pixels map to high levels (tall relief), bright pixels to level 0.

use serde::{Deserialize, Serialize};

/// Discrete height level of one heightmap cell
pub type Level = u8;

/// Default number of relief levels (physical layers)
pub const DEFAULT_LEVELS: u16 = 16;

/// Default width of the luminance input range (8-bit channels)
pub const DEFAULT_INPUT_RANGE: f64 = 256.0;

/// Highest level count that still fits in a [`Level`]
pub const MAX_LEVELS: u16 = Level::MAX as u16 + 1;

const LUMA_R: f64 = 0.2989;
const LUMA_G: f64 = 0.5870;
const LUMA_B: f64 = 0.1140;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QuantizeError {
    #[error("Level count must be between 2 and {MAX_LEVELS}, got {0}")]
    InvalidLevels(u16),

    #[error("Input range must be positive and finite, got {0}")]
    InvalidInputRange(f64),
}

/// Maps RGB samples onto `levels` discrete heights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quantizer {
    /// Number of output levels (N)
    pub levels: u16,
    /// Width of the luminance input range (256 for 8-bit channels)
    pub input_range: f64,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            input_range: DEFAULT_INPUT_RANGE,
        }
    }
}

impl Quantizer {
    pub fn new(levels: u16, input_range: f64) -> Result<Self, QuantizeError> {
        let quantizer = Self {
            levels,
            input_range,
        };
        quantizer.validate()?;
        Ok(quantizer)
    }

    pub fn validate(&self) -> Result<(), QuantizeError> {
        if !(2..=MAX_LEVELS).contains(&self.levels) {
            return Err(QuantizeError::InvalidLevels(self.levels));
        }
        if !self.input_range.is_finite() || self.input_range <= 0.0 {
            return Err(QuantizeError::InvalidInputRange(self.input_range));
        }
        Ok(())
    }

    /// Highest level this quantizer can produce
    pub fn max_level(&self) -> Level {
        (self.levels - 1) as Level
    }

    /// Quantize an RGB triple
    pub fn level(&self, r: u8, g: u8, b: u8) -> Level {
        self.level_for_luminance(luminance(r, g, b))
    }

    /// Quantize a luminance value
    ///
    /// Values outside `[0, input_range)` clamp to the nearest valid level.
    pub fn level_for_luminance(&self, luminance: f64) -> Level {
        let n = f64::from(self.levels);
        let step = (luminance * n / self.input_range).floor();
        let level = (n - 1.0) - step;
        level.clamp(0.0, f64::from(self.max_level())) as Level
    }
}

/// Luma of an RGB triple (no gamma correction)
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    f64::from(r) * LUMA_R + f64::from(g) * LUMA_G + f64::from(b) * LUMA_B
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_is_lowest_level() {
        let q = Quantizer::default();
        assert_eq!(q.level(255, 255, 255), 0);
    }

    #[test]
    fn test_black_is_highest_level() {
        let q = Quantizer::default();
        assert_eq!(q.level(0, 0, 0), 15);
    }

    #[test]
    fn test_level_boundaries_use_floor() {
        let q = Quantizer::default();
        // 16 luminance units per level with N=16 over 256
        assert_eq!(q.level_for_luminance(15.999), 15);
        assert_eq!(q.level_for_luminance(16.0), 14);
        assert_eq!(q.level_for_luminance(31.999), 14);
        assert_eq!(q.level_for_luminance(32.0), 13);
        assert_eq!(q.level_for_luminance(240.0), 0);
    }

    #[test]
    fn test_non_increasing_in_luminance() {
        let q = Quantizer::default();
        let mut previous = q.level(0, 0, 0);
        for v in 1..=255u8 {
            let level = q.level(v, v, v);
            assert!(level <= previous, "level rose at gray {}", v);
            previous = level;
        }
    }

    #[test]
    fn test_luma_weights() {
        assert!((luminance(255, 0, 0) - 76.2195).abs() < 1e-9);
        assert!((luminance(0, 255, 0) - 149.685).abs() < 1e-9);
        assert!((luminance(0, 0, 255) - 29.07).abs() < 1e-9);
    }

    #[test]
    fn test_custom_level_count() {
        let q = Quantizer::new(4, 256.0).unwrap();
        assert_eq!(q.max_level(), 3);
        assert_eq!(q.level(0, 0, 0), 3);
        assert_eq!(q.level(255, 255, 255), 0);
        // 64 luminance units per level
        assert_eq!(q.level_for_luminance(63.9), 3);
        assert_eq!(q.level_for_luminance(64.0), 2);
    }

    #[test]
    fn test_out_of_range_luminance_clamps() {
        let q = Quantizer::default();
        assert_eq!(q.level_for_luminance(1000.0), 0);
        assert_eq!(q.level_for_luminance(-50.0), 15);
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(
            Quantizer::new(1, 256.0),
            Err(QuantizeError::InvalidLevels(1))
        );
        assert_eq!(
            Quantizer::new(257, 256.0),
            Err(QuantizeError::InvalidLevels(257))
        );
        assert!(matches!(
            Quantizer::new(16, 0.0),
            Err(QuantizeError::InvalidInputRange(_))
        ));
    }
}
