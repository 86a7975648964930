//! Domain error types.

use chrono::NaiveDate;

/// A series that violates the bar-history contract. Always fatal for the
/// request that supplied it; metrics are never computed over bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("bars out of order: {prev} followed by {next}")]
    NonMonotonicDate { prev: NaiveDate, next: NaiveDate },

    #[error("duplicate bar date {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("invalid {field} price {value} on {date}")]
    InvalidPrice {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    #[error("negative volume {volume} on {date}")]
    NegativeVolume { date: NaiveDate, volume: i64 },
}

/// Top-level error type for stocklens.
#[derive(Debug, thiserror::Error)]
pub enum StocklensError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for symbol {symbol}")]
    NoData { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown period {input:?}, expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y")]
    UnknownPeriod { input: String },

    #[error(transparent)]
    InvalidSeries(#[from] SeriesError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StocklensError> for std::process::ExitCode {
    fn from(err: &StocklensError) -> Self {
        let code: u8 = match err {
            StocklensError::Io(_) => 1,
            StocklensError::ConfigParse { .. }
            | StocklensError::ConfigInvalid { .. }
            | StocklensError::UnknownPeriod { .. } => 2,
            StocklensError::Data { .. } | StocklensError::NoData { .. } => 3,
            StocklensError::InvalidSeries(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
