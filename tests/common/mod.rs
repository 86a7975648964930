#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use stocklens::domain::bar::Bar;
use stocklens::domain::error::StocklensError;
use stocklens::domain::period::Lookback;
use stocklens::domain::series::Series;
use stocklens::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Series>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.data.insert(series.symbol().to_string(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, symbol: &str, _lookback: Lookback) -> Result<Series, StocklensError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StocklensError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(series) => Ok(series.clone()),
            None => Err(StocklensError::NoData {
                symbol: symbol.to_string(),
            }),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, StocklensError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StocklensError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StocklensError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).and_then(|series| {
            series
                .first_date()
                .zip(series.last_date())
                .map(|(first, last)| (first, last, series.len()))
        }))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(date_str: &str, close: f64) -> Bar {
    Bar {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1_000,
    }
}

pub fn generate_bars(start_date: &str, closes: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000 + i as i64,
        })
        .collect()
}

pub fn make_series(symbol: &str, start_date: &str, closes: &[f64]) -> Series {
    Series::new(symbol, generate_bars(start_date, closes)).unwrap()
}

/// Write bars as `<symbol>.csv` in the adapter's on-disk layout.
pub fn write_symbol_csv(dir: &Path, symbol: &str, bars: &[Bar]) {
    let mut content = String::from("date,open,high,low,close,volume\n");
    for bar in bars {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }
    fs::write(dir.join(format!("{symbol}.csv")), content).unwrap();
}
