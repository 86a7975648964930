//! Validated daily bar series and the columns derived from it.

use chrono::{Datelike, NaiveDate};

use crate::domain::bar::Bar;
use crate::domain::error::SeriesError;

/// An ordered run of daily bars for one symbol.
///
/// Construction enforces the series contract: strictly ascending dates,
/// finite positive prices, non-negative volume. Everything downstream
/// assumes those invariants and never re-checks them.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for bar in &bars {
            bar.validate()?;
        }
        for pair in bars.windows(2) {
            if pair[1].date == pair[0].date {
                return Err(SeriesError::DuplicateDate { date: pair[1].date });
            }
            if pair[1].date < pair[0].date {
                return Err(SeriesError::NonMonotonicDate {
                    prev: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn last_volume(&self) -> Option<i64> {
        self.bars.last().map(|b| b.volume)
    }

    /// Close of the second-to-last bar.
    pub fn prev_close(&self) -> Option<f64> {
        if self.bars.len() < 2 {
            return None;
        }
        Some(self.bars[self.bars.len() - 2].close)
    }

    /// Simple close-to-close returns. One shorter than the series; the
    /// first bar has no predecessor.
    pub fn daily_returns(&self) -> Vec<f64> {
        self.bars
            .windows(2)
            .map(|pair| (pair[1].close - pair[0].close) / pair[0].close)
            .collect()
    }

    /// Absolute close-to-close change per bar, None for the first.
    pub fn price_changes(&self) -> Vec<Option<f64>> {
        let mut changes = Vec::with_capacity(self.bars.len());
        for (i, bar) in self.bars.iter().enumerate() {
            if i == 0 {
                changes.push(None);
            } else {
                changes.push(Some(bar.close - self.bars[i - 1].close));
            }
        }
        changes
    }

    /// Percent close-to-close change per bar, None for the first.
    pub fn percent_changes(&self) -> Vec<Option<f64>> {
        let mut changes = Vec::with_capacity(self.bars.len());
        for (i, bar) in self.bars.iter().enumerate() {
            if i == 0 {
                changes.push(None);
            } else {
                let prev = self.bars[i - 1].close;
                changes.push(Some((bar.close - prev) / prev * 100.0));
            }
        }
        changes
    }

    /// Contiguous run of bars whose date falls in `year`. Dates ascend, so
    /// years are non-decreasing and the run is a single slice.
    pub fn bars_in_year(&self, year: i32) -> &[Bar] {
        let Some(start) = self.bars.iter().position(|b| b.date.year() == year) else {
            return &[];
        };
        let run = self.bars[start..]
            .iter()
            .take_while(|b| b.date.year() == year)
            .count();
        &self.bars[start..start + run]
    }
}
