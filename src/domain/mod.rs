//! Core domain types and logic.

pub mod analysis;
pub mod bar;
pub mod error;
pub mod format;
pub mod indicator;
pub mod market;
pub mod overlay;
pub mod performance;
pub mod period;
pub mod risk;
pub mod series;
