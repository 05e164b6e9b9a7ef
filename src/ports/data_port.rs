//! Price series port (historical bars and ticker universe).

use crate::domain::error::SentraderError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

/// Shared across per-ticker tasks, hence `Sync`.
pub trait DataPort: Sync {
    /// Bars for `ticker` within [start_date, end_date], ascending by date.
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, SentraderError>;

    /// Every ticker this source can serve, sorted.
    fn list_symbols(&self) -> Result<Vec<String>, SentraderError>;
}
