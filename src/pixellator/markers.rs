//! Marker channel assignment and per-bit dispatch

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Number of marker inputs on the acquisition front end.
pub const NUM_MARKER_BITS: u8 = 4;

/// The role a marker channel plays in the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Line,
    Frame,
    PixelClock,
}

fn default_line_bit() -> u8 {
    1
}

/// Assignment of marker bits to marker kinds.
///
/// The line marker is mandatory; frame and pixel-clock markers may be
/// recorded but are not used for addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct MarkerMap {
    #[builder(default = default_line_bit())]
    #[serde(default = "default_line_bit")]
    pub line: u8,
    pub frame: Option<u8>,
    pub pixel: Option<u8>,
}

impl Default for MarkerMap {
    fn default() -> Self {
        Self {
            line: default_line_bit(),
            frame: None,
            pixel: None,
        }
    }
}

impl MarkerMap {
    /// Check that every assigned bit exists and that no bit serves two roles.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut used = 0u16;
        let assigned = [Some(self.line), self.frame, self.pixel];
        for bit in assigned.into_iter().flatten() {
            if bit >= NUM_MARKER_BITS {
                return Err(ConfigError::MarkerBitOutOfRange {
                    bit,
                    limit: NUM_MARKER_BITS,
                });
            }
            if used & (1 << bit) != 0 {
                return Err(ConfigError::DuplicateMarkerBit { bit });
            }
            used |= 1 << bit;
        }
        Ok(())
    }

    /// Build the bit-position lookup table. Call only on a validated map.
    pub fn table(&self) -> MarkerTable {
        let mut kinds = [None; NUM_MARKER_BITS as usize];
        let assigned = [
            (Some(self.line), MarkerKind::Line),
            (self.frame, MarkerKind::Frame),
            (self.pixel, MarkerKind::PixelClock),
        ];
        for (bit, kind) in assigned {
            if let Some(slot) = bit.and_then(|b| kinds.get_mut(b as usize)) {
                *slot = Some(kind);
            }
        }
        MarkerTable { kinds }
    }
}

/// Maps each marker bit position to the kind it was configured as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerTable {
    kinds: [Option<MarkerKind>; NUM_MARKER_BITS as usize],
}

impl MarkerTable {
    /// Kinds asserted by `bits`, in bit order. Unassigned bits are skipped.
    pub fn classify(&self, bits: u16) -> impl Iterator<Item = MarkerKind> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .filter(move |(bit, _)| bits & (1 << bit) != 0)
            .filter_map(|(_, kind)| *kind)
    }

    pub fn contains(&self, bits: u16, kind: MarkerKind) -> bool {
        self.classify(bits).any(|k| k == kind)
    }
}
