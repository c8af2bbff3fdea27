//! Line-clock pixellation of time-tagged photon streams.
//!
//! A laser-scanning microscope front end emits a single time-ordered stream
//! of marker pulses and photon arrivals. [`LineClockPixellator`] turns that
//! stream into pixel-addressed photons bracketed by frame begin/end
//! notifications, delivered to a [`PixelPhotonSink`].
//!
//! ```
//! use lineclock::{LineClockConfig, LineClockPixellator, MarkerEvent, RecordingSink};
//!
//! let config = LineClockConfig::builder()
//!     .width(2)
//!     .height(2)
//!     .pixel_interval(10)
//!     .line_interval(20)
//!     .build();
//! let mut lcp = LineClockPixellator::new(config, RecordingSink::new()).unwrap();
//! lcp.handle_marker(&MarkerEvent { bits: 1 << 1, macrotime: 100 });
//! assert_eq!(lcp.sink().begin_frame_count(), 1);
//! ```

pub mod error;
pub mod pixellator;
pub mod sink;
pub mod types;
pub mod utils;

#[cfg(feature = "python")]
mod python;

pub use error::{ConfigError, StreamError};
pub use pixellator::{FrameState, LineClockPixellator, MarkerKind, MarkerMap, PixellatorStats};
pub use sink::{LoggingSink, Notification, PixelPhotonCollector, PixelPhotonSink, RecordingSink};
pub use types::{DecodedPhoton, LineClockConfig, Macrotime, MarkerEvent, PixelPhotonEvent, Record};
pub use utils::{MarkerPosition, ScanTiming};
