//! Universe module: run the comparison over a ticker list and aggregate it.
//!
//! Each ticker is an independent task. Tasks return their own outcome and the
//! outcomes are merged into a [`UniverseReport`] only once every task is done.

use std::collections::HashSet;

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::domain::comparison::{compare, ComparisonRecord};
use crate::domain::error::SentraderError;
use crate::domain::metrics::{RunMetrics, UniverseSummary};
use crate::domain::sizing::SentimentScore;
use crate::domain::strategy::StrategyParams;
use crate::ports::data_port::DataPort;
use crate::ports::sentiment_port::SentimentPort;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn parse_codes(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let code = trimmed.to_uppercase();
        if !seen.insert(code.clone()) {
            return Err(UniverseError::DuplicateTicker(code));
        }
        codes.push(code);
    }

    Ok(codes)
}

#[derive(Debug, Clone)]
pub struct UniverseConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    pub params: StrategyParams,
    pub max_tickers: Option<usize>,
    pub parallel: bool,
}

/// A ticker left out of the aggregate, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerFailure {
    pub ticker: String,
    pub reason: String,
    /// The ticker's own data was unusable, as opposed to a source being unavailable.
    pub input_error: bool,
}

#[derive(Debug, Clone)]
pub struct TickerResult {
    pub record: ComparisonRecord,
    pub baseline_metrics: RunMetrics,
    pub adjusted_metrics: RunMetrics,
    /// False when the sentiment source failed and neutral was substituted.
    pub sentiment_available: bool,
}

#[derive(Debug, Clone)]
pub struct UniverseReport {
    pub results: Vec<TickerResult>,
    pub failures: Vec<TickerFailure>,
    pub summary: UniverseSummary,
}

impl UniverseReport {
    pub fn records(&self) -> impl Iterator<Item = &ComparisonRecord> {
        self.results.iter().map(|r| &r.record)
    }

    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Compare every ticker; failures are logged and excluded, never fatal.
pub fn run_universe(
    tickers: &[String],
    data_port: &dyn DataPort,
    sentiment_port: &dyn SentimentPort,
    config: &UniverseConfig,
) -> UniverseReport {
    let limit = config.max_tickers.unwrap_or(tickers.len()).min(tickers.len());
    let tickers = &tickers[..limit];

    tracing::info!(
        tickers = tickers.len(),
        start = %config.start_date,
        end = %config.end_date,
        parallel = config.parallel,
        "running universe comparison"
    );

    let task = |ticker: &String| -> Result<TickerResult, TickerFailure> {
        run_ticker(ticker, data_port, sentiment_port, config).map_err(|e| {
            let input_error = e.is_input_error();
            tracing::warn!(ticker = %ticker, error = %e, input_error, "skipping ticker");
            TickerFailure {
                ticker: ticker.clone(),
                reason: e.to_string(),
                input_error,
            }
        })
    };

    let outcomes: Vec<Result<TickerResult, TickerFailure>> = if config.parallel {
        tickers.par_iter().map(task).collect()
    } else {
        tickers.iter().map(task).collect()
    };

    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(failure) => failures.push(failure),
        }
    }

    let summary = UniverseSummary::compute(results.iter().map(|r| &r.record));

    tracing::info!(
        processed = results.len(),
        skipped = failures.len(),
        better = summary.better_count,
        "universe comparison finished"
    );

    UniverseReport {
        results,
        failures,
        summary,
    }
}

/// Fetch inputs for one ticker, then run both backtests on them.
pub fn run_ticker(
    ticker: &str,
    data_port: &dyn DataPort,
    sentiment_port: &dyn SentimentPort,
    config: &UniverseConfig,
) -> Result<TickerResult, SentraderError> {
    if config.end_date < config.start_date {
        return Err(SentraderError::InvalidDateRange {
            start: config.start_date,
            end: config.end_date,
        });
    }

    let bars = data_port.fetch_ohlcv(ticker, config.start_date, config.end_date)?;
    if bars.is_empty() {
        return Err(SentraderError::NoData {
            ticker: ticker.to_string(),
        });
    }

    let (sentiment, sentiment_available) =
        match sentiment_port.fetch_sentiment(ticker, config.start_date, config.end_date) {
            Ok(score) => (SentimentScore::new(score), true),
            Err(e) => {
                tracing::warn!(ticker, error = %e, "sentiment unavailable, using neutral score");
                (SentimentScore::NEUTRAL, false)
            }
        };

    let comparison = compare(ticker, &bars, sentiment, &config.params, config.initial_capital)?;

    tracing::info!(
        ticker,
        bars = bars.len(),
        sentiment = sentiment.value(),
        diff_value = comparison.record.diff_value,
        "ticker compared"
    );

    Ok(TickerResult {
        baseline_metrics: RunMetrics::compute(&comparison.baseline.portfolio),
        adjusted_metrics: RunMetrics::compute(&comparison.adjusted.portfolio),
        record: comparison.record,
        sentiment_available,
    })
}
