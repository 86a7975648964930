//! MACD (Moving Average Convergence Divergence) snapshot at the last bar.
//!
//! MACD Line = EMA(fast) - EMA(slow) of closes
//! Signal Line = EMA(signal) of the MACD line
//! Histogram = MACD Line - Signal Line
//!
//! Every EMA is seeded with its first input value, so the reading exists
//! for any non-empty series. There is no warmup; early readings converge
//! toward steady state as bars accumulate.

use crate::domain::indicator::MacdValue;
use crate::domain::indicator::ema::ema_series;
use crate::domain::series::Series;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn macd(series: &Series, fast: usize, slow: usize, signal: usize) -> Option<MacdValue> {
    if fast == 0 || slow == 0 || signal == 0 || series.is_empty() {
        return None;
    }

    let closes = series.closes();
    let ema_fast = ema_series(&closes, fast);
    let ema_slow = ema_series(&closes, slow);
    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_series(&line, signal);

    let line_last = *line.last()?;
    let signal_last = *signal_line.last()?;
    Some(MacdValue {
        line: line_last,
        signal: signal_last,
        histogram: line_last - signal_last,
    })
}

pub fn macd_default(series: &Series) -> Option<MacdValue> {
    macd(series, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
