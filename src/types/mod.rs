//! Type definitions for pixellator input, output, and configuration

pub mod config;
pub mod events;

// Re-export the main types for convenience
pub use config::LineClockConfig;
pub use events::{DecodedPhoton, Macrotime, MarkerEvent, PixelPhotonEvent, Record};
