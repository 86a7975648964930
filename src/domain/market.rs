//! Symbol normalization and listing-market detection.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Market {
    #[serde(rename = "Hong Kong")]
    HongKong,
    #[serde(rename = "United States")]
    UnitedStates,
    Other,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Market::HongKong => "Hong Kong",
            Market::UnitedStates => "United States",
            Market::Other => "Other",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketInfo {
    pub market: Market,
    pub exchange: &'static str,
    pub symbol: String,
    pub currency: &'static str,
}

/// Classify a raw ticker and normalize it for storage lookup.
///
/// Numeric codes are Hong Kong listings, zero-padded to four digits with
/// an `.HK` suffix ("700" and "0700.HK" both resolve to "0700.HK").
/// Purely alphabetic symbols are US listings. Anything else passes through
/// uppercased but unclassified.
pub fn detect_market(raw: &str) -> MarketInfo {
    let cleaned = raw.trim().to_uppercase();
    let stripped = cleaned.strip_suffix(".HK").unwrap_or(&cleaned);

    if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
        MarketInfo {
            market: Market::HongKong,
            exchange: "HKEX",
            symbol: format!("{stripped:0>4}.HK"),
            currency: "HKD",
        }
    } else if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_alphabetic()) {
        MarketInfo {
            market: Market::UnitedStates,
            exchange: "NASDAQ/NYSE",
            symbol: stripped.to_string(),
            currency: "USD",
        }
    } else {
        MarketInfo {
            market: Market::Other,
            exchange: "Various",
            symbol: cleaned,
            currency: "Various",
        }
    }
}
