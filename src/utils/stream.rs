//! Feeding record streams through a pixellator

use itertools::Itertools;
use tracing::debug;

use crate::pixellator::LineClockPixellator;
use crate::sink::PixelPhotonSink;
use crate::types::{DecodedPhoton, MarkerEvent, Record};

/// Merge separately buffered marker and photon records into a single stream
/// ordered by macrotime. Both inputs must already be time-ordered; on equal
/// macrotimes the marker comes first.
pub fn merge_records<M, P>(markers: M, photons: P) -> impl Iterator<Item = Record>
where
    M: IntoIterator<Item = MarkerEvent>,
    P: IntoIterator<Item = DecodedPhoton>,
{
    markers
        .into_iter()
        .map(Record::Marker)
        .merge_by(photons.into_iter().map(Record::Photon), |a, b| {
            a.macrotime() <= b.macrotime()
        })
}

/// Feed records to `pixellator` until the stream ends or the sink reports
/// itself done, then flush and signal end of stream.
pub fn drive<S, I>(pixellator: &mut LineClockPixellator<S>, records: I)
where
    S: PixelPhotonSink,
    I: IntoIterator<Item = Record>,
{
    for record in records {
        if pixellator.sink().is_done() {
            debug!("Sink done; no longer feeding records");
            break;
        }
        pixellator.handle_record(record);
    }
    pixellator.flush();
    pixellator.handle_finish();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{PixelPhotonCollector, RecordingSink};
    use crate::types::LineClockConfig;

    fn marker(macrotime: u64) -> MarkerEvent {
        MarkerEvent::builder().bits(1 << 1).macrotime(macrotime).build()
    }

    fn photon(macrotime: u64) -> DecodedPhoton {
        DecodedPhoton::builder().macrotime(macrotime).build()
    }

    fn config() -> LineClockConfig {
        LineClockConfig::builder()
            .width(2)
            .height(2)
            .pixel_interval(10)
            .line_interval(20)
            .build()
    }

    #[test]
    fn test_merge_orders_by_macrotime_markers_first() {
        let merged: Vec<Record> =
            merge_records(vec![marker(100), marker(200)], vec![photon(50), photon(100), photon(150)])
                .collect();
        assert_eq!(
            merged,
            vec![
                Record::Photon(photon(50)),
                Record::Marker(marker(100)),
                Record::Photon(photon(100)),
                Record::Photon(photon(150)),
                Record::Marker(marker(200)),
            ]
        );
    }

    #[test]
    fn test_drive_finishes_stream() {
        let mut lcp = LineClockPixellator::new(config(), RecordingSink::new()).unwrap();
        drive(&mut lcp, merge_records(vec![marker(100)], vec![photon(105)]));
        assert_eq!(lcp.sink().begin_frame_count(), 1);
        assert_eq!(lcp.sink().pixel_photons().len(), 1);
        assert_eq!(lcp.sink().finish_count(), 1);
    }

    #[test]
    fn test_drive_into_collector_keeps_complete_frames_only() {
        let markers = [100, 200, 300, 400, 500].map(marker);
        let photons = [105, 215, 305, 415, 505].map(photon);
        let mut lcp = LineClockPixellator::new(config(), PixelPhotonCollector::new()).unwrap();
        drive(&mut lcp, merge_records(markers, photons));

        let collector = lcp.into_sink();
        // Frames start at 100, 300, 500; the last has only one line
        assert_eq!(collector.frames_completed(), 2);
        let frames: Vec<(u32, u32, u32)> = collector
            .photons()
            .iter()
            .map(|(frame, e)| (*frame, e.x, e.y))
            .collect();
        assert_eq!(frames, vec![(0, 0, 0), (0, 1, 1), (1, 0, 0), (1, 1, 1)]);
        assert_eq!(collector.discarded_tail(), 1);
    }

    #[test]
    fn test_drive_stops_feeding_at_frame_limit() {
        let markers = [100, 200, 300, 400, 500, 600, 700].map(marker);
        let photons = [105, 215, 305, 415, 505, 615, 705].map(photon);
        let mut lcp =
            LineClockPixellator::new(config(), PixelPhotonCollector::with_max_frames(1)).unwrap();
        drive(&mut lcp, merge_records(markers, photons));

        // Feeding stops right after the marker at 300 closes the first frame
        assert_eq!(lcp.stats().line_markers, 3);
        assert_eq!(lcp.stats().photons, 2);
        let collector = lcp.into_sink();
        assert!(collector.is_finished());
        assert_eq!(collector.frames_completed(), 1);
        assert_eq!(collector.photons().len(), 2);
    }
}
