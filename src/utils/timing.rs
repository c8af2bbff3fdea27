//! Derivation of macrotime timing from scan parameters

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::pixellator::MarkerMap;
use crate::types::LineClockConfig;

/// Where in a line the scanner emits its line marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerPosition {
    #[default]
    LineStart,
    LineEnd,
}

/// Convert a duration expressed in pixels into macrotime units, rounded to
/// the nearest tick. `units_tenth_ns` is the macrotime clock period in
/// units of 0.1 ns.
pub fn pixels_to_macrotime(pixels: f64, pixel_rate_hz: f64, units_tenth_ns: u32) -> i64 {
    (1e10 * pixels / pixel_rate_hz / f64::from(units_tenth_ns)).round() as i64
}

/// Scan parameters as set on the scanner, before conversion to macrotime.
#[derive(Debug, Clone, Copy, PartialEq, Builder, Serialize, Deserialize)]
pub struct ScanTiming {
    pub width: u32,
    pub pixel_rate_hz: f64,
    pub macrotime_units_tenth_ns: u32,
    #[builder(default)]
    #[serde(default)]
    pub line_delay_pixels: f64,
    #[builder(default)]
    #[serde(default)]
    pub marker_position: MarkerPosition,
}

impl ScanTiming {
    fn validate(&self) -> ConfigResult<()> {
        if !self.pixel_rate_hz.is_finite() || self.pixel_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidPixelRate(self.pixel_rate_hz));
        }
        if self.macrotime_units_tenth_ns == 0 {
            return Err(ConfigError::InvalidMacrotimeUnits);
        }
        if !self.line_delay_pixels.is_finite() {
            return Err(ConfigError::InvalidLineDelay(self.line_delay_pixels));
        }
        Ok(())
    }

    fn to_macrotime(&self, pixels: f64) -> i64 {
        pixels_to_macrotime(pixels, self.pixel_rate_hz, self.macrotime_units_tenth_ns)
    }

    pub fn pixel_interval(&self) -> i64 {
        self.to_macrotime(1.0)
    }

    pub fn line_interval(&self) -> i64 {
        self.to_macrotime(f64::from(self.width))
    }

    /// Offset from a line marker to the start of that line's pixel window.
    /// With markers at line ends the window opens one line time earlier.
    pub fn line_delay(&self) -> i64 {
        let delay = self.to_macrotime(self.line_delay_pixels);
        match self.marker_position {
            MarkerPosition::LineStart => delay,
            MarkerPosition::LineEnd => delay - self.line_interval(),
        }
    }

    /// Pixellator configuration for frames of `height` lines.
    pub fn config(&self, height: u32, markers: MarkerMap) -> ConfigResult<LineClockConfig> {
        self.validate()?;
        let pixel_interval = u32::try_from(self.pixel_interval()).map_err(|_| {
            ConfigError::TimingOutOfRange {
                name: "pixel interval",
                value: self.pixel_interval(),
            }
        })?;
        let line_interval = u32::try_from(self.line_interval()).map_err(|_| {
            ConfigError::TimingOutOfRange {
                name: "line interval",
                value: self.line_interval(),
            }
        })?;
        let line_delay = i32::try_from(self.line_delay()).map_err(|_| {
            ConfigError::TimingOutOfRange {
                name: "line delay",
                value: self.line_delay(),
            }
        })?;

        let config = LineClockConfig::builder()
            .width(self.width)
            .height(height)
            .pixel_interval(pixel_interval)
            .line_delay(line_delay)
            .line_interval(line_interval)
            .markers(markers)
            .build();
        config.validate()?;
        Ok(config)
    }
}
