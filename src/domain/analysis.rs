//! One-shot assembly of every metric family for a series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::error::StocklensError;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::indicator::{bollinger, macd, rsi};
use crate::domain::performance::{PerformanceRecord, period_returns};
use crate::domain::risk::{DEFAULT_RISK_FREE_RATE, RiskSnapshot, risk_snapshot};
use crate::domain::series::Series;

/// Tunable windows and spans for the metric families.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    pub ma_short: usize,
    pub ma_long: usize,
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub risk_free_rate: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            ma_short: 20,
            ma_long: 50,
            rsi_period: rsi::DEFAULT_PERIOD,
            bollinger_period: bollinger::DEFAULT_PERIOD,
            bollinger_k: bollinger::DEFAULT_K,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl AnalysisParams {
    /// Reject parameter sets no metric can work with. Keys mirror the
    /// [analysis] config section.
    pub fn validate(&self) -> Result<(), StocklensError> {
        let window_keys = [
            ("ma_short", self.ma_short),
            ("ma_long", self.ma_long),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        for (key, value) in window_keys {
            if value == 0 {
                return Err(invalid(key, "must be at least 1"));
            }
        }
        if self.bollinger_period < 2 {
            return Err(invalid("bollinger_period", "must be at least 2"));
        }
        if !self.bollinger_k.is_finite() || self.bollinger_k <= 0.0 {
            return Err(invalid("bollinger_k", "must be a positive number"));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(invalid("risk_free_rate", "must be a finite number"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> StocklensError {
    StocklensError::ConfigInvalid {
        section: "analysis".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub symbol: String,
    pub bar_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub last_close: Option<f64>,
    pub prev_close: Option<f64>,
    pub last_volume: Option<i64>,
    pub indicators: IndicatorSnapshot,
    pub performance: Vec<PerformanceRecord>,
    pub risk: Option<RiskSnapshot>,
}

impl Analysis {
    /// Every family is computed independently over the same series; an
    /// undefined indicator or an omitted period never blocks the rest.
    pub fn compute(series: &Series, params: &AnalysisParams, as_of: NaiveDate) -> Self {
        Self {
            symbol: series.symbol().to_string(),
            bar_count: series.len(),
            first_date: series.first_date(),
            last_date: series.last_date(),
            last_close: series.last_close(),
            prev_close: series.prev_close(),
            last_volume: series.last_volume(),
            indicators: IndicatorSnapshot::compute(series, params),
            performance: period_returns(series, as_of),
            risk: risk_snapshot(series, params.risk_free_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bar::Bar;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_series(closes: &[f64]) -> Series {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: date(2024, 1, 1) + Duration::days(i as i64),
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
    fn compute_assembles_all_families() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 8.0)
            .collect();
        let series = make_series(&closes);
        let analysis = Analysis::compute(&series, &AnalysisParams::default(), date(2024, 3, 1));

        assert_eq!(analysis.symbol, "TEST");
        assert_eq!(analysis.bar_count, 60);
        assert_eq!(analysis.first_date, Some(date(2024, 1, 1)));
        assert!(analysis.indicators.rsi.is_some());
        assert!(analysis.indicators.macd.is_some());
        assert!(analysis.indicators.bollinger_position.is_some());
        assert!(!analysis.performance.is_empty());
        assert!(analysis.risk.is_some());
    }

    #[test]
    fn compute_on_sparse_series_still_reports() {
        // two bars: indicators mostly undefined, risk undefined, YTD present
        let series = make_series(&[100.0, 101.0]);
        let analysis = Analysis::compute(&series, &AnalysisParams::default(), date(2024, 1, 2));

        assert_eq!(analysis.indicators.rsi, None);
        assert!(analysis.indicators.macd.is_some());
        assert_eq!(analysis.risk, None);
        assert_eq!(analysis.performance.last().unwrap().period, "YTD");
        assert_eq!(analysis.last_close, Some(101.0));
        assert_eq!(analysis.prev_close, Some(100.0));
        assert_eq!(analysis.last_volume, Some(1_000));
    }

    #[test]
    fn compute_on_empty_series() {
        let series = Series::new("TEST", vec![]).unwrap();
        let analysis = Analysis::compute(&series, &AnalysisParams::default(), date(2024, 1, 2));

        assert_eq!(analysis.bar_count, 0);
        assert_eq!(analysis.last_close, None);
        assert!(analysis.performance.is_empty());
        assert_eq!(analysis.risk, None);
    }

    #[test]
    fn default_params_match_published_settings() {
        let params = AnalysisParams::default();
        assert_eq!(params.ma_short, 20);
        assert_eq!(params.ma_long, 50);
        assert_eq!(params.rsi_period, 14);
        assert_eq!(params.bollinger_period, 20);
        assert!((params.bollinger_k - 2.0).abs() < f64::EPSILON);
        assert_eq!(params.macd_fast, 12);
        assert_eq!(params.macd_slow, 26);
        assert_eq!(params.macd_signal, 9);
        assert!((params.risk_free_rate - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(AnalysisParams::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_window() {
        let params = AnalysisParams {
            rsi_period: 0,
            ..AnalysisParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(StocklensError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn validate_rejects_short_bollinger_window() {
        let params = AnalysisParams {
            bollinger_period: 1,
            ..AnalysisParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_k() {
        let params = AnalysisParams {
            bollinger_k: 0.0,
            ..AnalysisParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn analysis_serializes_to_json() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&closes);
        let analysis = Analysis::compute(&series, &AnalysisParams::default(), date(2024, 2, 1));

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["symbol"], "TEST");
        assert_eq!(value["bar_count"], 30);
        assert!(value["indicators"]["macd"]["histogram"].is_number());
        assert!(value["performance"].is_array());
        assert!(value["risk"]["sharpe_ratio"].is_number());
    }
}
