//! Port traits decoupling the domain from external collaborators.

pub mod config_port;
pub mod data_port;
pub mod export_port;
pub mod report_port;
