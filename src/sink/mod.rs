//! Downstream consumers of pixellator output

pub mod collector;
pub mod logging;
pub mod recorder;

pub use collector::PixelPhotonCollector;
pub use logging::LoggingSink;
pub use recorder::{Notification, RecordingSink};

use crate::types::PixelPhotonEvent;

/// Receiver of the notifications emitted by a pixellator.
///
/// The pixellator never calls `handle_pixel_photon` outside an open frame and
/// never calls `handle_end_frame` without an unmatched `handle_begin_frame`.
/// Notifications cannot be rejected; any buffering is up to the implementer.
pub trait PixelPhotonSink {
    fn handle_begin_frame(&mut self);
    fn handle_end_frame(&mut self);
    fn handle_pixel_photon(&mut self, event: PixelPhotonEvent);
    fn handle_error(&mut self, message: &str);
    fn handle_finish(&mut self);

    /// Whether the sink wants no further records. Stream drivers stop
    /// feeding once this returns true; the pixellator itself never asks.
    fn is_done(&self) -> bool {
        false
    }
}

impl<S: PixelPhotonSink + ?Sized> PixelPhotonSink for &mut S {
    fn handle_begin_frame(&mut self) {
        (**self).handle_begin_frame();
    }

    fn handle_end_frame(&mut self) {
        (**self).handle_end_frame();
    }

    fn handle_pixel_photon(&mut self, event: PixelPhotonEvent) {
        (**self).handle_pixel_photon(event);
    }

    fn handle_error(&mut self, message: &str) {
        (**self).handle_error(message);
    }

    fn handle_finish(&mut self) {
        (**self).handle_finish();
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }
}

impl<S: PixelPhotonSink + ?Sized> PixelPhotonSink for Box<S> {
    fn handle_begin_frame(&mut self) {
        (**self).handle_begin_frame();
    }

    fn handle_end_frame(&mut self) {
        (**self).handle_end_frame();
    }

    fn handle_pixel_photon(&mut self, event: PixelPhotonEvent) {
        (**self).handle_pixel_photon(event);
    }

    fn handle_error(&mut self, message: &str) {
        (**self).handle_error(message);
    }

    fn handle_finish(&mut self) {
        (**self).handle_finish();
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }
}
