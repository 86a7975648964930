//! Time-based memoization decorator for a data port.
//!
//! Fetch results are keyed by (symbol, lookback) and reused until the
//! entry ages past the TTL. Errors are never cached, so a missing symbol
//! can appear without waiting for expiry. Wraps any DataPort, which keeps
//! cached and fresh fetches interchangeable for the metric code.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::domain::error::StocklensError;
use crate::domain::period::Lookback;
use crate::domain::series::Series;
use crate::ports::data_port::DataPort;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    stored_at: Instant,
    series: Series,
}

pub struct CachingDataPort<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<(String, Lookback), CacheEntry>>,
}

impl<P: DataPort> CachingDataPort<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<P: DataPort> DataPort for CachingDataPort<P> {
    fn fetch_series(&self, symbol: &str, lookback: Lookback) -> Result<Series, StocklensError> {
        let key = (symbol.to_string(), lookback);
        {
            let entries = self.entries.lock().expect("series cache lock poisoned");
            if let Some(entry) = entries.get(&key) {
                if entry.stored_at.elapsed() < self.ttl {
                    return Ok(entry.series.clone());
                }
            }
        }

        let series = self.inner.fetch_series(symbol, lookback)?;
        let mut entries = self.entries.lock().expect("series cache lock poisoned");
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                series: series.clone(),
            },
        );
        Ok(series)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StocklensError> {
        self.inner.list_symbols()
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StocklensError> {
        self.inner.data_range(symbol)
    }
}
