//! Relative Strength Index snapshot at the last bar.
//!
//! Close-to-close deltas over the trailing window split into gains and
//! losses, each averaged with a simple mean over the window length:
//!   RS = mean_gain / mean_loss
//!   RSI = 100 - 100 / (1 + RS)
//!
//! mean_loss == 0 with gains present saturates to 100. A window with no
//! movement at all (0/0) has no defined reading. Needs window+1 closes to
//! form window deltas.

use crate::domain::series::Series;

pub const DEFAULT_PERIOD: usize = 14;

pub fn rsi(series: &Series, window: usize) -> Option<f64> {
    if window == 0 {
        return None;
    }
    let closes = series.closes();
    if closes.len() < window + 1 {
        return None;
    }

    let start = closes.len() - window - 1;
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in closes[start..].windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum -= delta;
        }
    }

    let mean_gain = gain_sum / window as f64;
    let mean_loss = loss_sum / window as f64;

    if mean_gain == 0.0 && mean_loss == 0.0 {
        return None;
    }
    if mean_loss == 0.0 {
        return Some(100.0);
    }

    let rs = mean_gain / mean_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}
