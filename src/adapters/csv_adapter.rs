//! CSV directory data adapter.
//!
//! One file per symbol at `<dir>/<SYMBOL>.csv` with the header
//! date,open,high,low,close,volume. Rows are decoded, sorted by date,
//! validated into a Series, and sliced to the requested lookback anchored
//! at the newest stored bar.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::bar::Bar;
use crate::domain::error::StocklensError;
use crate::domain::period::Lookback;
use crate::domain::series::Series;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct BarRecord {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

impl From<BarRecord> for Bar {
    fn from(record: BarRecord) -> Self {
        Bar {
            date: record.date,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        }
    }
}

impl CsvAdapter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.base_dir.join(format!("{symbol}.csv"))
    }

    fn read_bars(&self, symbol: &str) -> Result<Vec<Bar>, StocklensError> {
        let path = self.symbol_path(symbol);
        if !path.exists() {
            return Err(StocklensError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(&path).map_err(|e| StocklensError::Data {
            reason: format!("failed to open {}: {e}", path.display()),
        })?;

        let mut bars = Vec::new();
        for row in reader.deserialize::<BarRecord>() {
            let record = row.map_err(|e| StocklensError::Data {
                reason: format!("{}: {e}", path.display()),
            })?;
            bars.push(Bar::from(record));
        }

        // files may be appended out of order; duplicates still fail
        // series validation afterwards
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, symbol: &str, lookback: Lookback) -> Result<Series, StocklensError> {
        let bars = self.read_bars(symbol)?;
        let Some(last) = bars.last() else {
            return Err(StocklensError::NoData {
                symbol: symbol.to_string(),
            });
        };

        let start = lookback.window_start(last.date);
        let bars: Vec<Bar> = bars.into_iter().filter(|b| b.date >= start).collect();
        Ok(Series::new(symbol, bars)?)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StocklensError> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| StocklensError::Data {
            reason: format!("failed to read {}: {e}", self.base_dir.display()),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StocklensError::Data {
                reason: format!("directory entry error: {e}"),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    symbols.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StocklensError> {
        if !self.symbol_path(symbol).exists() {
            return Ok(None);
        }
        let bars = self.read_bars(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}
