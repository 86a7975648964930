//! Rolling chart overlays: moving averages and Bollinger bands.
//!
//! An overlay is aligned 1:1 with its source series by position. Positions
//! before the window first fills are None, and the value at position i is
//! computed from bars ..=i only, never from later bars.

use crate::domain::series::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// Simple moving average of closes over a trailing `window`.
pub fn moving_average(series: &Series, window: usize) -> Overlay {
    let closes = series.closes();
    let mut values = vec![None; closes.len()];
    if window >= 1 {
        for i in (window - 1)..closes.len() {
            let slice = &closes[i + 1 - window..=i];
            values[i] = Some(mean(slice));
        }
    }
    Overlay {
        label: format!("MA {window}"),
        values,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Overlay,
    pub lower: Overlay,
}

/// Bollinger bands: trailing-window mean plus/minus `k` sample standard
/// deviations (n-1 divisor). Sample std needs two observations, so windows
/// below 2 produce no defined positions.
pub fn bollinger_bands(series: &Series, window: usize, k: f64) -> BollingerBands {
    let closes = series.closes();
    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];
    if window >= 2 {
        for i in (window - 1)..closes.len() {
            let slice = &closes[i + 1 - window..=i];
            let mid = mean(slice);
            let band = k * sample_std(slice, mid);
            upper[i] = Some(mid + band);
            lower[i] = Some(mid - band);
        }
    }
    BollingerBands {
        upper: Overlay {
            label: "BB Upper".into(),
            values: upper,
        },
        lower: Overlay {
            label: "BB Lower".into(),
            values: lower,
        },
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}
