//! OHLCV bar representation and series validation.

use chrono::NaiveDate;

use super::error::SentraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Reject series the engine cannot walk: empty, or dates not strictly ascending.
pub fn validate_series(ticker: &str, bars: &[OhlcvBar]) -> Result<(), SentraderError> {
    if bars.is_empty() {
        return Err(SentraderError::EmptySeries {
            ticker: ticker.to_string(),
        });
    }

    for pair in bars.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(SentraderError::NonAscendingDates {
                ticker: ticker.to_string(),
                previous: pair[0].date,
                date: pair[1].date,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> OhlcvBar {
        OhlcvBar {
            ticker: "AAPL".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn empty_series_rejected() {
        let err = validate_series("AAPL", &[]).unwrap_err();
        assert!(matches!(err, SentraderError::EmptySeries { ref ticker } if ticker == "AAPL"));
    }

    #[test]
    fn single_bar_accepted() {
        assert!(validate_series("AAPL", &[bar(2, 100.0)]).is_ok());
    }

    #[test]
    fn ascending_accepted() {
        let bars = vec![bar(2, 100.0), bar(3, 101.0), bar(5, 99.0)];
        assert!(validate_series("AAPL", &bars).is_ok());
    }

    #[test]
    fn duplicate_date_rejected() {
        let bars = vec![bar(2, 100.0), bar(3, 101.0), bar(3, 102.0)];
        let err = validate_series("AAPL", &bars).unwrap_err();
        assert!(matches!(err, SentraderError::NonAscendingDates { .. }));
    }

    #[test]
    fn descending_date_rejected() {
        let bars = vec![bar(4, 100.0), bar(3, 101.0)];
        match validate_series("AAPL", &bars) {
            Err(SentraderError::NonAscendingDates { previous, date, .. }) => {
                assert_eq!(previous, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
            }
            other => panic!("expected NonAscendingDates, got {other:?}"),
        }
    }
}
