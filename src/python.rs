//! Python bindings

use pyo3::{
    Bound, PyErr, PyResult, exceptions::PyRuntimeError, exceptions::PyValueError, pyfunction,
    pymodule, types::PyModule, types::PyModuleMethods, wrap_pyfunction,
};
use pyo3_polars::PyDataFrame;

use crate::error::ConfigError;
use crate::pixellator::{LineClockPixellator, MarkerMap};
use crate::sink::PixelPhotonCollector;
use crate::types::{DecodedPhoton, LineClockConfig, MarkerEvent, Record};
use crate::utils::drive;

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Assigns photons to pixels of complete frames using line-marker timing.
///
/// Records are given as parallel arrays in macrotime order. A record with
/// non-zero `marker_bits` is a marker; all others are photons.
///
/// Args:
///     macrotime (list[int]): Record macrotimes.
///     marker_bits (list[int]): Marker bits per record (0 for photons).
///     width (int): Pixels per line.
///     height (int): Lines per frame.
///     pixel_interval (int): Pixel dwell time in macrotime units.
///     line_interval (int): Line duration in macrotime units.
///     line_delay (int): Offset from line marker to first pixel.
///     line_marker_bit (int): Marker bit carrying the line clock.
///     microtime (list[int] | None): Photon microtimes.
///     channel (list[int] | None): Photon channels.
///     max_frames (int | None): Stop after this many complete frames.
///
/// Returns:
///     tuple[polars.DataFrame, list[str]]: Pixel photons of complete frames
///     (`frame, x, y, macrotime, microtime, channel`) and any stream errors.
///
/// Raises:
///     ValueError: If the configuration is invalid or array lengths differ.
#[pyfunction]
#[pyo3(signature = (
    macrotime,
    marker_bits,
    width,
    height,
    pixel_interval,
    line_interval,
    line_delay = 0,
    line_marker_bit = 1,
    microtime = None,
    channel = None,
    max_frames = None
))]
#[allow(clippy::too_many_arguments)]
fn pixellate_to_py_df(
    macrotime: Vec<u64>,
    marker_bits: Vec<u16>,
    width: u32,
    height: u32,
    pixel_interval: u32,
    line_interval: u32,
    line_delay: i32,
    line_marker_bit: u8,
    microtime: Option<Vec<u16>>,
    channel: Option<Vec<u16>>,
    max_frames: Option<u32>,
) -> PyResult<(PyDataFrame, Vec<String>)> {
    let n = macrotime.len();
    let microtime = microtime.unwrap_or_else(|| vec![0; n]);
    let channel = channel.unwrap_or_else(|| vec![0; n]);
    if marker_bits.len() != n || microtime.len() != n || channel.len() != n {
        return Err(PyValueError::new_err(format!(
            "All record arrays must have length {}",
            n
        )));
    }

    let config = LineClockConfig::builder()
        .width(width)
        .height(height)
        .pixel_interval(pixel_interval)
        .line_delay(line_delay)
        .line_interval(line_interval)
        .markers(MarkerMap::builder().line(line_marker_bit).build())
        .build();
    let collector = match max_frames {
        Some(max) => PixelPhotonCollector::with_max_frames(max),
        None => PixelPhotonCollector::new(),
    };
    let mut pixellator = LineClockPixellator::new(config, collector)?;

    let records = (0..n).map(|i| {
        if marker_bits[i] != 0 {
            Record::Marker(MarkerEvent {
                bits: marker_bits[i],
                macrotime: macrotime[i],
            })
        } else {
            Record::Photon(DecodedPhoton {
                macrotime: macrotime[i],
                microtime: microtime[i],
                channel: channel[i],
            })
        }
    });
    drive(&mut pixellator, records);

    let collector = pixellator.into_sink();
    let df = collector
        .to_dataframe()
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    Ok((PyDataFrame(df), collector.errors().to_vec()))
}

/// The name of this function must match the `lib.name` setting in
/// `Cargo.toml`, else Python will not be able to import the module.
#[pymodule]
fn lineclock(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(pixellate_to_py_df, m)?)?;
    Ok(())
}
