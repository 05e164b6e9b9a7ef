//! News sentiment port.

use crate::domain::error::SentraderError;
use chrono::NaiveDate;

pub trait SentimentPort: Sync {
    /// Net news tone for `ticker` over [start_date, end_date], in [-1, 1].
    fn fetch_sentiment(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<f64, SentraderError>;
}

/// Source that knows nothing; every ticker reads as neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralSentiment;

impl SentimentPort for NeutralSentiment {
    fn fetch_sentiment(
        &self,
        _ticker: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<f64, SentraderError> {
        Ok(0.0)
    }
}

/// Stands in for a configured source that could not be loaded; every
/// lookup fails so callers mark the ticker as having no sentiment.
#[derive(Debug, Clone)]
pub struct UnavailableSentiment {
    pub reason: String,
}

impl SentimentPort for UnavailableSentiment {
    fn fetch_sentiment(
        &self,
        _ticker: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<f64, SentraderError> {
        Err(SentraderError::upstream("sentiment data", self.reason.clone()))
    }
}
