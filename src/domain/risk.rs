//! Risk and volatility statistics over the full daily return series.
//!
//! All four statistics come from the same return vector:
//! - annualized volatility: sample std of daily returns * sqrt(252), as %
//! - Sharpe: (mean daily return * 252 - risk-free rate) / annualized vol
//! - max drawdown: deepest decline of the cumulative return index from its
//!   running peak, as % (0 or negative)
//! - VaR 95: 5th percentile of daily returns with linear interpolation, as %

use serde::Serialize;

use crate::domain::series::Series;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSnapshot {
    pub annualized_volatility_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub var_95_pct: f64,
}

/// Computes the whole block or nothing: sample std needs at least two
/// returns, so series shorter than three bars have no risk reading.
pub fn risk_snapshot(series: &Series, risk_free_rate: f64) -> Option<RiskSnapshot> {
    let returns = series.daily_returns();
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let annualized_vol = variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt();

    let sharpe_ratio = if annualized_vol > 0.0 {
        (mean * TRADING_DAYS_PER_YEAR - risk_free_rate) / annualized_vol
    } else {
        0.0
    };

    Some(RiskSnapshot {
        annualized_volatility_pct: annualized_vol * 100.0,
        sharpe_ratio,
        max_drawdown_pct: max_drawdown(&returns) * 100.0,
        var_95_pct: percentile(&returns, 5.0) * 100.0,
    })
}

/// Deepest decline of the compounded return index from its running peak.
/// 0 for a series that never dips below a prior high.
fn max_drawdown(returns: &[f64]) -> f64 {
    let mut cumulative = 1.0_f64;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;
    for ret in returns {
        cumulative *= 1.0 + ret;
        if cumulative > peak {
            peak = cumulative;
        }
        if peak > 0.0 {
            let dd = (cumulative - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Percentile with linear interpolation between the two closest ranks.
/// `values` must be non-empty.
fn percentile(values: &[f64], pct: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}
