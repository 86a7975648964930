//! Analysis report rendering port trait.

use std::io;

use crate::domain::analysis::Analysis;
use crate::domain::error::StocklensError;
use crate::domain::market::MarketInfo;

/// Port for rendering a finished analysis to a writer.
pub trait ReportPort {
    fn write(
        &self,
        analysis: &Analysis,
        market: &MarketInfo,
        out: &mut dyn io::Write,
    ) -> Result<(), StocklensError>;
}
