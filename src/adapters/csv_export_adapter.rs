//! CSV dataset export adapter.
//!
//! Main file columns: Date, Open, High, Low, Close, Change %, Volume,
//! Price Change, then one column per overlay. Prices are rounded to two
//! decimals for presentation; undefined cells stay empty. A sidecar at
//! `<stem>.meta.csv` carries Property/Value rows describing the export.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::domain::error::StocklensError;
use crate::domain::market::MarketInfo;
use crate::domain::overlay::Overlay;
use crate::domain::series::Series;
use crate::ports::export_port::ExportPort;

pub struct CsvExportAdapter {
    exported_on: NaiveDate,
}

impl CsvExportAdapter {
    pub fn new(exported_on: NaiveDate) -> Self {
        Self { exported_on }
    }

    fn sidecar_path(path: &Path) -> PathBuf {
        path.with_extension("meta.csv")
    }
}

fn round2(value: f64) -> String {
    format!("{value:.2}")
}

fn round2_opt(value: Option<f64>) -> String {
    value.map(round2).unwrap_or_default()
}

impl ExportPort for CsvExportAdapter {
    fn write_history(
        &self,
        series: &Series,
        market: &MarketInfo,
        overlays: &[Overlay],
        path: &Path,
    ) -> Result<(), StocklensError> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| StocklensError::Data {
            reason: format!("failed to create {}: {e}", path.display()),
        })?;

        let mut header = vec![
            "Date".to_string(),
            "Open".to_string(),
            "High".to_string(),
            "Low".to_string(),
            "Close".to_string(),
            "Change %".to_string(),
            "Volume".to_string(),
            "Price Change".to_string(),
        ];
        for overlay in overlays {
            header.push(overlay.label.clone());
        }
        writer
            .write_record(&header)
            .map_err(|e| StocklensError::Data {
                reason: format!("CSV write error: {e}"),
            })?;

        let price_changes = series.price_changes();
        let percent_changes = series.percent_changes();
        for (i, bar) in series.bars().iter().enumerate() {
            let mut row = vec![
                bar.date.to_string(),
                round2(bar.open),
                round2(bar.high),
                round2(bar.low),
                round2(bar.close),
                round2_opt(percent_changes[i]),
                bar.volume.to_string(),
                round2_opt(price_changes[i]),
            ];
            for overlay in overlays {
                row.push(round2_opt(overlay.values[i]));
            }
            writer.write_record(&row).map_err(|e| StocklensError::Data {
                reason: format!("CSV write error: {e}"),
            })?;
        }
        writer.flush()?;

        let meta_path = Self::sidecar_path(path);
        let mut meta = csv::Writer::from_path(&meta_path).map_err(|e| StocklensError::Data {
            reason: format!("failed to create {}: {e}", meta_path.display()),
        })?;
        let rows = [
            ("Property", "Value".to_string()),
            ("Symbol", series.symbol().to_string()),
            ("Market", market.market.to_string()),
            ("Exchange", market.exchange.to_string()),
            ("Currency", market.currency.to_string()),
            ("Data Export Date", self.exported_on.to_string()),
            ("Total Records", series.len().to_string()),
        ];
        for (property, value) in rows {
            meta.write_record([property, value.as_str()])
                .map_err(|e| StocklensError::Data {
                    reason: format!("CSV write error: {e}"),
                })?;
        }
        meta.flush()?;

        Ok(())
    }
}
