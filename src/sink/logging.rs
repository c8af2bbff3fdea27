use tracing::{debug, trace, warn};

use super::PixelPhotonSink;
use crate::types::PixelPhotonEvent;

/// Logs every notification through `tracing`, then forwards it to `inner`.
///
/// Errors are surfaced at `warn` level and are never fatal.
#[derive(Debug)]
pub struct LoggingSink<S> {
    inner: S,
    frames_begun: u64,
}

impl<S: PixelPhotonSink> LoggingSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            frames_begun: 0,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: PixelPhotonSink> PixelPhotonSink for LoggingSink<S> {
    fn handle_begin_frame(&mut self) {
        debug!(frame = self.frames_begun, "Frame begin");
        self.frames_begun += 1;
        self.inner.handle_begin_frame();
    }

    fn handle_end_frame(&mut self) {
        debug!(frame = self.frames_begun.saturating_sub(1), "Frame end");
        self.inner.handle_end_frame();
    }

    fn handle_pixel_photon(&mut self, event: PixelPhotonEvent) {
        trace!(
            x = event.x,
            y = event.y,
            macrotime = event.macrotime(),
            "Pixel photon"
        );
        self.inner.handle_pixel_photon(event);
    }

    fn handle_error(&mut self, message: &str) {
        warn!("Pixellator error: {}", message);
        self.inner.handle_error(message);
    }

    fn handle_finish(&mut self) {
        debug!(frames = self.frames_begun, "Stream finished");
        self.inner.handle_finish();
    }

    fn is_done(&self) -> bool {
        self.inner.is_done()
    }
}
