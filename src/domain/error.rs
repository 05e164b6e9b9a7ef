//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for sentrader.
#[derive(Debug, thiserror::Error)]
pub enum SentraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("empty price series for {ticker}")]
    EmptySeries { ticker: String },

    #[error("price series for {ticker} is not strictly ascending at {date} (previous {previous})")]
    NonAscendingDates {
        ticker: String,
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("{source_name} unavailable: {reason}")]
    Upstream { source_name: String, reason: String },

    #[error("no price data for {ticker}")]
    NoData { ticker: String },

    #[error("no sentiment data for {ticker} between {start} and {end}")]
    NoSentiment {
        ticker: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("no ticker produced a comparison ({attempted} attempted)")]
    NoResults { attempted: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SentraderError {
    /// Input errors are fatal to a single ticker's run and never retried.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SentraderError::EmptySeries { .. }
                | SentraderError::NonAscendingDates { .. }
                | SentraderError::InvalidDateRange { .. }
        )
    }

    pub fn upstream(source_name: &str, reason: impl Into<String>) -> Self {
        SentraderError::Upstream {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&SentraderError> for std::process::ExitCode {
    fn from(err: &SentraderError) -> Self {
        let code: u8 = match err {
            SentraderError::Io(_) | SentraderError::Csv(_) => 1,
            SentraderError::ConfigParse { .. }
            | SentraderError::ConfigMissing { .. }
            | SentraderError::ConfigInvalid { .. } => 2,
            SentraderError::Upstream { .. }
            | SentraderError::NoData { .. }
            | SentraderError::NoSentiment { .. } => 3,
            SentraderError::EmptySeries { .. }
            | SentraderError::NonAscendingDates { .. }
            | SentraderError::InvalidDateRange { .. }
            | SentraderError::NoResults { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
