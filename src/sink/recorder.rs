use serde::Serialize;

use super::PixelPhotonSink;
use crate::types::PixelPhotonEvent;

/// A single notification as received by a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notification {
    BeginFrame,
    EndFrame,
    PixelPhoton(PixelPhotonEvent),
    Error(String),
    Finish,
}

/// Sink that records every notification in arrival order
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Vec<Notification>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Take everything recorded so far, leaving the recorder empty
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn reset(&mut self) {
        self.notifications.clear();
    }

    pub fn begin_frame_count(&self) -> usize {
        self.count(|n| matches!(n, Notification::BeginFrame))
    }

    pub fn end_frame_count(&self) -> usize {
        self.count(|n| matches!(n, Notification::EndFrame))
    }

    pub fn finish_count(&self) -> usize {
        self.count(|n| matches!(n, Notification::Finish))
    }

    pub fn pixel_photons(&self) -> Vec<PixelPhotonEvent> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::PixelPhoton(event) => Some(*event),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Notification) -> bool) -> usize {
        self.notifications.iter().filter(|n| pred(n)).count()
    }
}

impl PixelPhotonSink for RecordingSink {
    fn handle_begin_frame(&mut self) {
        self.notifications.push(Notification::BeginFrame);
    }

    fn handle_end_frame(&mut self) {
        self.notifications.push(Notification::EndFrame);
    }

    fn handle_pixel_photon(&mut self, event: PixelPhotonEvent) {
        self.notifications.push(Notification::PixelPhoton(event));
    }

    fn handle_error(&mut self, message: &str) {
        self.notifications.push(Notification::Error(message.to_owned()));
    }

    fn handle_finish(&mut self) {
        self.notifications.push(Notification::Finish);
    }
}
