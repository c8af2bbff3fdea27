//! Frame-aware collection of pixel photons into a DataFrame

use polars::prelude::*;
use tracing::debug;

use super::PixelPhotonSink;
use crate::types::PixelPhotonEvent;

/// Collects pixel photons of complete frames only.
///
/// Photons are held in a pending buffer while their frame is open and are
/// committed when the frame ends. Whatever is pending at finish belongs to an
/// incomplete trailing frame and is dropped.
///
/// With a frame limit, collection stops once that many frames have been
/// committed and the collector reports itself done.
#[derive(Debug, Default)]
pub struct PixelPhotonCollector {
    max_frames: Option<u32>,
    frames_completed: u32,
    pending: Vec<PixelPhotonEvent>,
    committed: Vec<(u32, PixelPhotonEvent)>,
    errors: Vec<String>,
    discarded_tail: usize,
    finished: bool,
}

impl PixelPhotonCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collector that stops after `max_frames` complete frames
    pub fn with_max_frames(max_frames: u32) -> Self {
        Self {
            max_frames: Some(max_frames),
            ..Self::default()
        }
    }

    pub fn max_frames(&self) -> Option<u32> {
        self.max_frames
    }

    fn limit_reached(&self) -> bool {
        self.max_frames.is_some_and(|max| self.frames_completed >= max)
    }

    pub fn frames_completed(&self) -> u32 {
        self.frames_completed
    }

    /// Committed photons tagged with the index of their frame
    pub fn photons(&self) -> &[(u32, PixelPhotonEvent)] {
        &self.committed
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Number of photons dropped with the incomplete trailing frame
    pub fn discarded_tail(&self) -> usize {
        self.discarded_tail
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Committed photons as a DataFrame with columns
    /// `frame, x, y, macrotime, microtime, channel`.
    pub fn to_dataframe(&self) -> Result<DataFrame, PolarsError> {
        let frames: Vec<u32> = self.committed.iter().map(|(f, _)| *f).collect();
        let xs: Vec<u32> = self.committed.iter().map(|(_, e)| e.x).collect();
        let ys: Vec<u32> = self.committed.iter().map(|(_, e)| e.y).collect();
        let macrotimes: Vec<u64> = self.committed.iter().map(|(_, e)| e.macrotime()).collect();
        let microtimes: Vec<u32> = self
            .committed
            .iter()
            .map(|(_, e)| u32::from(e.photon.microtime))
            .collect();
        let channels: Vec<u32> = self
            .committed
            .iter()
            .map(|(_, e)| u32::from(e.photon.channel))
            .collect();

        DataFrame::new(vec![
            Series::new("frame".into(), &frames).into(),
            Series::new("x".into(), &xs).into(),
            Series::new("y".into(), &ys).into(),
            Series::new("macrotime".into(), &macrotimes).into(),
            Series::new("microtime".into(), &microtimes).into(),
            Series::new("channel".into(), &channels).into(),
        ])
    }
}

impl PixelPhotonSink for PixelPhotonCollector {
    fn handle_begin_frame(&mut self) {
        self.pending.clear();
    }

    fn handle_end_frame(&mut self) {
        if self.limit_reached() {
            self.pending.clear();
            return;
        }
        let frame = self.frames_completed;
        self.committed
            .extend(self.pending.drain(..).map(|event| (frame, event)));
        self.frames_completed += 1;
    }

    fn handle_pixel_photon(&mut self, event: PixelPhotonEvent) {
        if !self.limit_reached() {
            self.pending.push(event);
        }
    }

    fn handle_error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }

    fn handle_finish(&mut self) {
        self.discarded_tail = self.pending.len();
        if self.discarded_tail > 0 {
            debug!(
                photons = self.discarded_tail,
                "Dropping photons of incomplete trailing frame"
            );
        }
        self.pending.clear();
        self.finished = true;
    }

    fn is_done(&self) -> bool {
        self.limit_reached()
    }
}
