//! Point-in-time technical indicator snapshots.
//!
//! Each indicator reads the trailing closes of a series and reports one
//! value for the latest bar, or None when its inputs are not defined yet.
//! Indicators are computed independently of each other: one undefined
//! reading never blocks the rest.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;

use serde::Serialize;

use crate::domain::analysis::AnalysisParams;
use crate::domain::series::Series;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub macd: Option<MacdValue>,
    pub bollinger_position: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn compute(series: &Series, params: &AnalysisParams) -> Self {
        Self {
            rsi: rsi::rsi(series, params.rsi_period),
            macd: macd::macd(
                series,
                params.macd_fast,
                params.macd_slow,
                params.macd_signal,
            ),
            bollinger_position: bollinger::bollinger_position(
                series,
                params.bollinger_period,
                params.bollinger_k,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::Bar;
    use chrono::{Duration, NaiveDate};

    fn make_series(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000,
            })
            .collect();
        Series::new("TEST", bars).unwrap()
    }

    #[test]
    fn snapshot_indicators_are_independent() {
        // 10 bars: too short for RSI(14) and Bollinger(20), but MACD is
        // defined for any non-empty series
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&closes);
        let snapshot = IndicatorSnapshot::compute(&series, &AnalysisParams::default());

        assert_eq!(snapshot.rsi, None);
        assert_eq!(snapshot.bollinger_position, None);
        assert!(snapshot.macd.is_some());
    }

    #[test]
    fn snapshot_all_defined_with_enough_history() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0)
            .collect();
        let series = make_series(&closes);
        let snapshot = IndicatorSnapshot::compute(&series, &AnalysisParams::default());

        assert!(snapshot.rsi.is_some());
        assert!(snapshot.macd.is_some());
        assert!(snapshot.bollinger_position.is_some());
    }

    #[test]
    fn snapshot_empty_series_all_undefined() {
        let series = make_series(&[]);
        let snapshot = IndicatorSnapshot::compute(&series, &AnalysisParams::default());

        assert_eq!(snapshot.rsi, None);
        assert_eq!(snapshot.macd, None);
        assert_eq!(snapshot.bollinger_position, None);
    }

    #[test]
    fn snapshot_respects_custom_params() {
        let closes: Vec<f64> = (0..8).map(|i| 100.0 + ((i % 3) as f64)).collect();
        let series = make_series(&closes);
        let params = AnalysisParams {
            rsi_period: 4,
            bollinger_period: 5,
            ..AnalysisParams::default()
        };
        let snapshot = IndicatorSnapshot::compute(&series, &params);

        assert!(snapshot.rsi.is_some());
        assert!(snapshot.bollinger_position.is_some());
    }
}
