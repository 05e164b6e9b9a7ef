//! Baseline vs sentiment-adjusted comparison for a single ticker.

use serde::Serialize;

use super::backtest::{BacktestEngine, BacktestResult};
use super::error::SentraderError;
use super::ohlcv::OhlcvBar;
use super::sizing::SentimentScore;
use super::strategy::StrategyParams;

/// One row of the cross-ticker comparison. `diff_*` is adjusted minus baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub ticker: String,
    pub old_cash: f64,
    pub old_value: f64,
    pub new_cash: f64,
    pub new_value: f64,
    pub diff_cash: f64,
    pub diff_value: f64,
    pub sentiment: f64,
    pub is_better: bool,
}

/// Both full runs behind a [`ComparisonRecord`].
#[derive(Debug, Clone)]
pub struct Comparison {
    pub record: ComparisonRecord,
    pub baseline: BacktestResult,
    pub adjusted: BacktestResult,
}

/// Run the strategy twice over the same bars: flat sizing, then sentiment sizing.
pub fn compare(
    ticker: &str,
    bars: &[OhlcvBar],
    sentiment: SentimentScore,
    params: &StrategyParams,
    initial_capital: f64,
) -> Result<Comparison, SentraderError> {
    let baseline = BacktestEngine::new(params, params.baseline_sizer(), initial_capital)
        .run(ticker, bars)?;
    let adjusted = BacktestEngine::new(params, params.adjusted_sizer(sentiment), initial_capital)
        .run(ticker, bars)?;

    let old = baseline.summary;
    let new = adjusted.summary;
    let diff_value = new.final_value - old.final_value;

    let record = ComparisonRecord {
        ticker: ticker.to_string(),
        old_cash: old.final_cash,
        old_value: old.final_value,
        new_cash: new.final_cash,
        new_value: new.final_value,
        diff_cash: new.final_cash - old.final_cash,
        diff_value,
        sentiment: sentiment.value(),
        is_better: diff_value > 0.0,
    };

    Ok(Comparison {
        record,
        baseline,
        adjusted,
    })
}
