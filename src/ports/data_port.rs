//! Historical data access port trait.

use chrono::NaiveDate;

use crate::domain::error::StocklensError;
use crate::domain::period::Lookback;
use crate::domain::series::Series;

pub trait DataPort {
    /// Fetch the bar history for `symbol` covering `lookback`, anchored at
    /// the newest stored bar. The returned series already satisfies the
    /// series contract.
    fn fetch_series(&self, symbol: &str, lookback: Lookback) -> Result<Series, StocklensError>;

    fn list_symbols(&self) -> Result<Vec<String>, StocklensError>;

    /// First date, last date and bar count for a symbol, None when the
    /// symbol is unknown.
    fn data_range(&self, symbol: &str)
    -> Result<Option<(NaiveDate, NaiveDate, usize)>, StocklensError>;
}
