//! Error types for pixellator configuration and event streams

use thiserror::Error;

use crate::types::Macrotime;

/// Reasons a pixellator configuration is rejected at construction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Frame width must be positive")]
    ZeroWidth,

    #[error("Frame height must be positive")]
    ZeroHeight,

    #[error("Pixel interval must be positive")]
    ZeroPixelInterval,

    #[error("Line interval must be positive")]
    ZeroLineInterval,

    #[error("Marker bit {bit} is out of range (must be < {limit})")]
    MarkerBitOutOfRange { bit: u8, limit: u8 },

    #[error("Marker bit {bit} is assigned to more than one marker kind")]
    DuplicateMarkerBit { bit: u8 },

    #[error("Pixel rate must be finite and positive, got {0}")]
    InvalidPixelRate(f64),

    #[error("Macrotime units must be positive")]
    InvalidMacrotimeUnits,

    #[error("Line delay must be finite, got {0} pixels")]
    InvalidLineDelay(f64),

    #[error("Derived {name} of {value} macrotime units is out of range")]
    TimingOutOfRange { name: &'static str, value: i64 },
}

/// Which kind of record triggered a stream error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Marker,
    Photon,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Marker => write!(f, "marker"),
            RecordKind::Photon => write!(f, "photon"),
        }
    }
}

/// Recoverable protocol violations detected while consuming records.
///
/// These are never returned to the caller; the pixellator renders them
/// into the message passed to the sink's error handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error(
        "Non-monotonic macrotime: {record} record at {macrotime} precedes last seen macrotime {last_seen}"
    )]
    NonMonotonicMacrotime {
        record: RecordKind,
        macrotime: Macrotime,
        last_seen: Macrotime,
    },
}

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_monotonic_message_names_record_and_times() {
        let err = StreamError::NonMonotonicMacrotime {
            record: RecordKind::Photon,
            macrotime: 150,
            last_seen: 200,
        };
        let message = err.to_string();
        assert!(message.contains("photon"));
        assert!(message.contains("150"));
        assert!(message.contains("200"));
    }
}
