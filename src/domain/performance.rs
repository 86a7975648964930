//! Period-over-period performance returns.
//!
//! Each lookback is a trading-day count into the stored history, not a
//! calendar distance: "1 Month" compares against the close 21 bars back.
//! A lookback with insufficient history is omitted from the output rather
//! than reported over a shorter span.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::series::Series;

/// Lookback table in display order: label and trading-day count.
pub const LOOKBACKS: &[(&str, usize)] = &[
    ("1 Day", 1),
    ("1 Week", 5),
    ("1 Month", 21),
    ("3 Months", 63),
    ("6 Months", 126),
    ("1 Year", 252),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecord {
    pub period: String,
    pub return_pct: f64,
}

/// Returns for every lookback with enough history, then YTD.
///
/// A lookback of n days needs strictly more than n bars, so the comparison
/// close n bars back exists. YTD compares the last close against the first
/// close of `as_of`'s calendar year and reads 0 when the series has no
/// bars in that year. An empty series yields no records at all.
pub fn period_returns(series: &Series, as_of: NaiveDate) -> Vec<PerformanceRecord> {
    let closes = series.closes();
    let Some(&last) = closes.last() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for &(label, days) in LOOKBACKS {
        if closes.len() > days {
            let start = closes[closes.len() - 1 - days];
            records.push(PerformanceRecord {
                period: label.to_string(),
                return_pct: (last - start) / start * 100.0,
            });
        }
    }

    let year_bars = series.bars_in_year(as_of.year());
    let ytd = match year_bars.first() {
        Some(first) => (last - first.close) / first.close * 100.0,
        None => 0.0,
    };
    records.push(PerformanceRecord {
        period: "YTD".to_string(),
        return_pct: ytd,
    });

    records
}
