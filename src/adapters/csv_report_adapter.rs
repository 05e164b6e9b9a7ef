//! CSV comparison report adapter.

use crate::domain::error::SentraderError;
use crate::domain::universe::UniverseReport;
use crate::ports::report_port::ReportPort;

/// Writes one row per [`ComparisonRecord`](crate::domain::comparison::ComparisonRecord).
/// Skipped tickers are not written.
pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &UniverseReport, output_path: &str) -> Result<(), SentraderError> {
        let mut wtr = csv::Writer::from_path(output_path)?;
        for record in report.records() {
            wtr.serialize(record)?;
        }
        wtr.flush()?;

        tracing::info!(
            path = output_path,
            rows = report.results.len(),
            "comparison report written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comparison::ComparisonRecord;
    use crate::domain::metrics::{RunMetrics, UniverseSummary};
    use crate::domain::universe::{TickerFailure, TickerResult};
    use tempfile::TempDir;

    fn metrics() -> RunMetrics {
        RunMetrics {
            total_return: 0.0,
            total_trades: 0,
            trades_won: 0,
            win_rate: 0.0,
            max_drawdown: 0.0,
        }
    }

    fn result(ticker: &str, old_value: f64, new_value: f64) -> TickerResult {
        TickerResult {
            record: ComparisonRecord {
                ticker: ticker.to_string(),
                old_cash: 1000.0,
                old_value,
                new_cash: 1000.0,
                new_value,
                diff_cash: 0.0,
                diff_value: new_value - old_value,
                sentiment: 0.25,
                is_better: new_value > old_value,
            },
            baseline_metrics: metrics(),
            adjusted_metrics: metrics(),
            sentiment_available: true,
        }
    }

    fn report() -> UniverseReport {
        let results = vec![result("AAPL", 1100.0, 1150.5), result("MSFT", 900.0, 880.0)];
        let summary = UniverseSummary::compute(results.iter().map(|r| &r.record));
        UniverseReport {
            results,
            failures: vec![TickerFailure {
                ticker: "XYZ".to_string(),
                reason: "no price data for XYZ".to_string(),
                input_error: false,
            }],
            summary,
        }
    }

    #[test]
    fn writes_header_and_one_row_per_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        let path_str = path.to_str().unwrap();

        CsvReportAdapter.write(&report(), path_str).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "ticker,old_cash,old_value,new_cash,new_value,diff_cash,diff_value,sentiment,is_better"
        );
        assert!(lines[1].starts_with("AAPL,1000.0,1100.0,1000.0,1150.5,"));
        assert!(lines[1].ends_with(",true"));
        assert!(lines[2].starts_with("MSFT,"));
        assert!(lines[2].ends_with(",false"));
        assert!(!content.contains("XYZ"));
    }

    #[test]
    fn unwritable_path_is_error() {
        let result = CsvReportAdapter.write(&report(), "/nonexistent/dir/results.csv");
        assert!(result.is_err());
    }
}
