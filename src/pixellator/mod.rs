//! Reconstruction of pixel-addressed photon events from marker timing

pub mod line_clock;
pub mod markers;

pub use line_clock::{FrameState, LineClockPixellator, PixellatorStats};
pub use markers::{MarkerKind, MarkerMap, MarkerTable, NUM_MARKER_BITS};
