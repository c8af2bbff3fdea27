//! Types for the records flowing into and out of the pixellator

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Hardware clock tick count. Monotonically increasing across an acquisition.
pub type Macrotime = u64;

/// A marker record. `bits` holds every marker channel asserted at `macrotime`;
/// several may be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct MarkerEvent {
    pub bits: u16,
    pub macrotime: Macrotime,
}

/// A decoded photon-arrival record.
///
/// Only `macrotime` is interpreted when addressing pixels; the remaining
/// fields are carried through to the pixel photon unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct DecodedPhoton {
    pub macrotime: Macrotime,
    /// TCSPC time bin (photon delay relative to the laser sync)
    #[builder(default)]
    pub microtime: u16,
    /// Detector channel (routing bits)
    #[builder(default)]
    pub channel: u16,
}

/// A photon assigned to a pixel of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPhotonEvent {
    pub x: u32,
    pub y: u32,
    pub photon: DecodedPhoton,
}

impl PixelPhotonEvent {
    pub fn macrotime(&self) -> Macrotime {
        self.photon.macrotime
    }
}

/// One record of the upstream decoder's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Record {
    Marker(MarkerEvent),
    Photon(DecodedPhoton),
}

impl Record {
    pub fn macrotime(&self) -> Macrotime {
        match self {
            Record::Marker(marker) => marker.macrotime,
            Record::Photon(photon) => photon.macrotime,
        }
    }
}

impl From<MarkerEvent> for Record {
    fn from(marker: MarkerEvent) -> Self {
        Record::Marker(marker)
    }
}

impl From<DecodedPhoton> for Record {
    fn from(photon: DecodedPhoton) -> Self {
        Record::Photon(photon)
    }
}
