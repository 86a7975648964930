//! Dataset export port trait.

use std::path::Path;

use crate::domain::error::StocklensError;
use crate::domain::market::MarketInfo;
use crate::domain::overlay::Overlay;
use crate::domain::series::Series;

/// Port for writing a full historical dataset to disk.
pub trait ExportPort {
    /// Write the bar history with derived change columns, one extra column
    /// per overlay, and a metadata sidecar describing the export.
    fn write_history(
        &self,
        series: &Series,
        market: &MarketInfo,
        overlays: &[Overlay],
        path: &Path,
    ) -> Result<(), StocklensError>;
}
