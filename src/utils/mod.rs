//! Timing derivation and stream helpers

pub mod stream;
pub mod timing;

// Re-export commonly used utility functions for convenience
pub use stream::{drive, merge_records};
pub use timing::{MarkerPosition, ScanTiming, pixels_to_macrotime};
