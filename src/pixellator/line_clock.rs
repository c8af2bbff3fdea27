//! Pixel addressing driven by line markers only

use tracing::{debug, trace, warn};

use super::markers::{MarkerKind, MarkerTable};
use crate::error::{ConfigResult, RecordKind, StreamError};
use crate::sink::PixelPhotonSink;
use crate::types::{
    DecodedPhoton, LineClockConfig, Macrotime, MarkerEvent, PixelPhotonEvent, Record,
};

/// Frame/line position of the pixellator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    NoFrame,
    FrameOpen {
        line_index: u32,
        /// Macrotime at which the active line's pixel window opens
        line_start: i128,
    },
}

/// Counters collected while consuming a record stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixellatorStats {
    pub markers: u64,
    pub line_markers: u64,
    pub photons: u64,
    pub photons_delivered: u64,
    pub photons_discarded: u64,
    pub frames_begun: u64,
    pub frames_ended: u64,
    pub errors: u64,
}

/// Converts a time-ordered stream of marker and photon records into pixel
/// photons bracketed by frame begin/end notifications.
///
/// X coordinates are derived from the time elapsed since the current line's
/// marker; Y is the index of the line within the frame. The end of the last
/// line of a frame is inferred from elapsed time when no further line marker
/// arrives.
#[derive(Debug)]
pub struct LineClockPixellator<S> {
    config: LineClockConfig,
    markers: MarkerTable,
    state: FrameState,
    last_seen: Option<Macrotime>,
    stats: PixellatorStats,
    sink: S,
}

impl<S: PixelPhotonSink> LineClockPixellator<S> {
    /// Create a pixellator; fails if any geometry or timing parameter is zero
    /// or the marker assignment is invalid. Emits nothing.
    pub fn new(config: LineClockConfig, sink: S) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            markers: config.markers.table(),
            config,
            state: FrameState::NoFrame,
            last_seen: None,
            stats: PixellatorStats::default(),
            sink,
        })
    }

    pub fn config(&self) -> &LineClockConfig {
        &self.config
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn stats(&self) -> PixellatorStats {
        self.stats
    }

    pub fn last_seen(&self) -> Option<Macrotime> {
        self.last_seen
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn handle_record(&mut self, record: Record) {
        match record {
            Record::Marker(marker) => self.handle_marker(&marker),
            Record::Photon(photon) => self.handle_timestamp(&photon),
        }
    }

    pub fn handle_marker(&mut self, event: &MarkerEvent) {
        self.stats.markers += 1;
        if !self.accept_time(RecordKind::Marker, event.macrotime) {
            return;
        }

        let mut is_line = false;
        for kind in self.markers.classify(event.bits) {
            match kind {
                MarkerKind::Line => is_line = true,
                MarkerKind::Frame | MarkerKind::PixelClock => {
                    trace!(?kind, macrotime = event.macrotime, "Ignoring marker kind");
                }
            }
        }
        if is_line {
            self.stats.line_markers += 1;
            self.start_line(event.macrotime);
        }

        self.last_seen = Some(event.macrotime);
        self.check_inferred_completion();
    }

    pub fn handle_timestamp(&mut self, event: &DecodedPhoton) {
        self.stats.photons += 1;
        if !self.accept_time(RecordKind::Photon, event.macrotime) {
            return;
        }

        match self.address(event.macrotime) {
            Some((x, y)) => {
                self.stats.photons_delivered += 1;
                self.sink.handle_pixel_photon(PixelPhotonEvent {
                    x,
                    y,
                    photon: *event,
                });
            }
            None => {
                self.stats.photons_discarded += 1;
                trace!(macrotime = event.macrotime, "Photon outside any line window");
            }
        }

        self.last_seen = Some(event.macrotime);
        self.check_inferred_completion();
    }

    /// Re-evaluate inferred frame completion against the latest macrotime.
    /// Calling this repeatedly without new records emits nothing further.
    pub fn flush(&mut self) {
        self.check_inferred_completion();
    }

    /// Forward end-of-stream to the sink. An open frame stays open and is
    /// never reported as ended.
    pub fn handle_finish(&mut self) {
        if let FrameState::FrameOpen { line_index, .. } = self.state {
            debug!(line_index, "Stream finished with incomplete frame");
        }
        self.sink.handle_finish();
    }

    fn accept_time(&mut self, record: RecordKind, macrotime: Macrotime) -> bool {
        match self.last_seen {
            Some(last_seen) if macrotime < last_seen => {
                let err = StreamError::NonMonotonicMacrotime {
                    record,
                    macrotime,
                    last_seen,
                };
                warn!("{}", err);
                self.stats.errors += 1;
                self.sink.handle_error(&err.to_string());
                false
            }
            _ => true,
        }
    }

    fn start_line(&mut self, macrotime: Macrotime) {
        let line_start = i128::from(macrotime) + i128::from(self.config.line_delay);
        let line_index = match self.state {
            FrameState::NoFrame => {
                self.begin_frame();
                0
            }
            FrameState::FrameOpen { line_index, .. } if line_index + 1 >= self.config.height => {
                self.end_frame();
                self.begin_frame();
                0
            }
            FrameState::FrameOpen { line_index, .. } => line_index + 1,
        };
        self.state = FrameState::FrameOpen {
            line_index,
            line_start,
        };
    }

    fn address(&self, macrotime: Macrotime) -> Option<(u32, u32)> {
        let FrameState::FrameOpen {
            line_index,
            line_start,
        } = self.state
        else {
            return None;
        };
        let offset = i128::from(macrotime) - line_start;
        if offset < 0 || offset >= i128::from(self.config.line_window()) {
            return None;
        }
        let x = offset / i128::from(self.config.pixel_interval);
        Some((u32::try_from(x).ok()?, line_index))
    }

    fn check_inferred_completion(&mut self) {
        let FrameState::FrameOpen {
            line_index,
            line_start,
        } = self.state
        else {
            return;
        };
        let Some(last_seen) = self.last_seen else {
            return;
        };
        if line_index + 1 != self.config.height {
            return;
        }
        let elapsed = i128::from(last_seen) - line_start;
        if elapsed >= i128::from(self.config.line_interval) {
            debug!(last_seen, %line_start, "Last line complete by elapsed time");
            self.end_frame();
            self.state = FrameState::NoFrame;
        }
    }

    fn begin_frame(&mut self) {
        debug!(frame = self.stats.frames_begun, "Begin frame");
        self.stats.frames_begun += 1;
        self.sink.handle_begin_frame();
    }

    fn end_frame(&mut self) {
        debug!(frame = self.stats.frames_ended, "End frame");
        self.stats.frames_ended += 1;
        self.sink.handle_end_frame();
    }
}
