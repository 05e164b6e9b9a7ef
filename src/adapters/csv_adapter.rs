//! CSV price data adapter.
//!
//! One file per ticker, `<base>/<TICKER>.csv`, header
//! `date,open,high,low,close,volume` with ISO dates.

use crate::domain::config_validation::DATE_FORMAT;
use crate::domain::error::SentraderError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const SOURCE: &str = "price data";

#[derive(Debug, Deserialize)]
struct PriceRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, SentraderError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| {
            SentraderError::upstream(SOURCE, format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for row in rdr.deserialize::<PriceRow>() {
            let row = row.map_err(|e| {
                SentraderError::upstream(SOURCE, format!("{}: {}", path.display(), e))
            })?;
            let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|e| {
                SentraderError::upstream(
                    SOURCE,
                    format!("{}: invalid date {:?}: {}", path.display(), row.date, e),
                )
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(OhlcvBar {
                ticker: ticker.to_string(),
                date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        if sort_by_date(&mut bars) {
            tracing::debug!(
                ticker,
                path = %path.display(),
                rows = bars.len(),
                "price rows out of date order, sorted"
            );
        }
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, SentraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            SentraderError::upstream(
                SOURCE,
                format!("failed to read directory {}: {}", self.base_path.display(), e),
            )
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                symbols.push(stem.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

/// Sort bars by date. Returns true when any row had to move.
fn sort_by_date(bars: &mut [OhlcvBar]) -> bool {
    if bars.windows(2).all(|w| w[0].date <= w[1].date) {
        return false;
    }
    bars.sort_by_key(|b| b.date);
    true
}
