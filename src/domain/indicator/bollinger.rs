//! Bollinger band position snapshot at the last bar.
//!
//! Position = (close - lower) / (upper - lower) * 100 for the trailing
//! window's bands. 0 sits on the lower band, 100 on the upper; readings
//! outside [0, 100] mean the close has escaped the bands. A zero-width
//! band (flat window) has no defined position.

use crate::domain::overlay::bollinger_bands;
use crate::domain::series::Series;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_K: f64 = 2.0;

pub fn bollinger_position(series: &Series, window: usize, k: f64) -> Option<f64> {
    let bands = bollinger_bands(series, window, k);
    let upper = bands.upper.values.last().copied().flatten()?;
    let lower = bands.lower.values.last().copied().flatten()?;
    let close = series.last_close()?;

    let width = upper - lower;
    if width == 0.0 {
        return None;
    }
    Some((close - lower) / width * 100.0)
}
