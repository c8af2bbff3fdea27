//! Geometry and timing configuration of a line-clock pixellator

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::pixellator::markers::MarkerMap;

/// Fixed configuration of a [`LineClockPixellator`](crate::LineClockPixellator).
///
/// All intervals are in macrotime units.
/// - `pixel_interval`: dwell time of one pixel column
/// - `line_delay`: offset from a line marker to the start of the line's pixel
///   window; negative when the window opens before the marker
/// - `line_interval`: expected duration of a line, used to infer the end of
///   the last line of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct LineClockConfig {
    pub width: u32,
    pub height: u32,
    pub pixel_interval: u32,
    #[builder(default)]
    #[serde(default)]
    pub line_delay: i32,
    pub line_interval: u32,
    #[builder(default)]
    #[serde(default)]
    pub markers: MarkerMap,
}

impl LineClockConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.pixel_interval == 0 {
            return Err(ConfigError::ZeroPixelInterval);
        }
        if self.line_interval == 0 {
            return Err(ConfigError::ZeroLineInterval);
        }
        self.markers.validate()
    }

    /// Length of a line's pixel window
    pub fn line_window(&self) -> i64 {
        i64::from(self.width) * i64::from(self.pixel_interval)
    }
}
