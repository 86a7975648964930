//! Daily OHLCV bar representation.

use chrono::NaiveDate;

use crate::domain::error::SeriesError;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Bar {
    /// Prices must be finite and positive, volume non-negative.
    pub fn validate(&self) -> Result<(), SeriesError> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    date: self.date,
                    field,
                    value,
                });
            }
        }
        if self.volume < 0 {
            return Err(SeriesError::NegativeVolume {
                date: self.date,
                volume: self.volume,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000,
        }
    }

    #[test]
    fn valid_bar_passes() {
        assert!(sample_bar().validate().is_ok());
    }

    #[test]
    fn zero_price_rejected() {
        let bar = Bar {
            close: 0.0,
            ..sample_bar()
        };
        assert!(matches!(
            bar.validate(),
            Err(SeriesError::InvalidPrice { field: "close", .. })
        ));
    }

    #[test]
    fn negative_price_rejected() {
        let bar = Bar {
            low: -1.0,
            ..sample_bar()
        };
        assert!(matches!(
            bar.validate(),
            Err(SeriesError::InvalidPrice { field: "low", .. })
        ));
    }

    #[test]
    fn nan_price_rejected() {
        let bar = Bar {
            open: f64::NAN,
            ..sample_bar()
        };
        assert!(matches!(
            bar.validate(),
            Err(SeriesError::InvalidPrice { field: "open", .. })
        ));
    }

    #[test]
    fn negative_volume_rejected() {
        let bar = Bar {
            volume: -5,
            ..sample_bar()
        };
        assert!(matches!(
            bar.validate(),
            Err(SeriesError::NegativeVolume { volume: -5, .. })
        ));
    }

    #[test]
    fn zero_volume_allowed() {
        let bar = Bar {
            volume: 0,
            ..sample_bar()
        };
        assert!(bar.validate().is_ok());
    }
}
