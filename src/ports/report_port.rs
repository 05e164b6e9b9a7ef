//! Report output port.

use crate::domain::error::SentraderError;
use crate::domain::universe::UniverseReport;

/// Port for persisting a universe comparison.
pub trait ReportPort {
    fn write(&self, report: &UniverseReport, output_path: &str) -> Result<(), SentraderError>;
}
