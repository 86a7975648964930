//! Plain-text report adapter implementing ReportPort.
//!
//! Renders one analysis as a terminal-friendly summary: header, price line,
//! then Technical Indicators, Performance and Risk sections. Metrics the
//! series was too short to support print as "n/a".

use std::io::{self, Write};

use crate::domain::analysis::Analysis;
use crate::domain::error::StocklensError;
use crate::domain::format;
use crate::domain::market::MarketInfo;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn currency_prefix(currency: &str) -> &'static str {
    if currency == "HKD" { "HKD " } else { "$" }
}

fn two_places(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "n/a".into())
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        analysis: &Analysis,
        market: &MarketInfo,
        out: &mut dyn io::Write,
    ) -> Result<(), StocklensError> {
        writeln!(
            out,
            "{} ({}, {})",
            analysis.symbol, market.market, market.currency
        )?;
        if let (Some(first), Some(last)) = (analysis.first_date, analysis.last_date) {
            writeln!(out, "Data Range: {first} to {last}")?;
        }
        writeln!(out, "Total Records: {} trading days", analysis.bar_count)?;
        if let Some(close) = analysis.last_close {
            let prefix = currency_prefix(market.currency);
            match analysis.prev_close {
                Some(prev) if prev != 0.0 => {
                    let change = close - prev;
                    let change_pct = change / prev * 100.0;
                    writeln!(
                        out,
                        "Price: {prefix}{close:.2} {change:+.2} ({change_pct:+.2}%)"
                    )?;
                }
                _ => writeln!(out, "Price: {prefix}{close:.2}")?,
            }
        }
        if let Some(volume) = analysis.last_volume {
            writeln!(out, "Volume: {}", format::count(volume as f64))?;
        }

        writeln!(out)?;
        writeln!(out, "Technical Indicators")?;
        writeln!(out, "  RSI: {}", two_places(analysis.indicators.rsi))?;
        match analysis.indicators.macd {
            Some(m) => {
                writeln!(out, "  MACD: {:.4}", m.line)?;
                writeln!(out, "  MACD Signal: {:.4}", m.signal)?;
                writeln!(out, "  MACD Histogram: {:.4}", m.histogram)?;
            }
            None => writeln!(out, "  MACD: n/a")?,
        }
        let bollinger = analysis
            .indicators
            .bollinger_position
            .map(format::pct)
            .unwrap_or_else(|| "n/a".into());
        writeln!(out, "  Bollinger Position: {bollinger}")?;

        writeln!(out)?;
        writeln!(out, "Performance")?;
        for record in &analysis.performance {
            writeln!(
                out,
                "  {}: {}",
                record.period,
                format::signed_pct(record.return_pct)
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Risk")?;
        match &analysis.risk {
            Some(risk) => {
                writeln!(
                    out,
                    "  Annualized Volatility: {}",
                    format::pct(risk.annualized_volatility_pct)
                )?;
                writeln!(out, "  Sharpe Ratio: {:.2}", risk.sharpe_ratio)?;
                writeln!(out, "  Max Drawdown: {}", format::pct(risk.max_drawdown_pct))?;
                writeln!(out, "  VaR (95%): {}", format::pct(risk.var_95_pct))?;
            }
            None => writeln!(out, "  n/a (needs at least two daily returns)")?,
        }

        Ok(())
    }
}
