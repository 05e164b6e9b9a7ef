#![allow(dead_code)]

use chrono::NaiveDate;
use sentrader::domain::error::SentraderError;
pub use sentrader::domain::ohlcv::OhlcvBar;
use sentrader::domain::strategy::StrategyParams;
use sentrader::domain::universe::UniverseConfig;
use sentrader::ports::data_port::DataPort;
use sentrader::ports::sentiment_port::SentimentPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, SentraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(SentraderError::upstream("price data", reason.clone()));
        }
        Ok(self
            .data
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, SentraderError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub struct MockSentimentPort {
    pub scores: HashMap<String, f64>,
    pub errors: HashMap<String, String>,
}

impl MockSentimentPort {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_score(mut self, ticker: &str, score: f64) -> Self {
        self.scores.insert(ticker.to_string(), score);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl SentimentPort for MockSentimentPort {
    fn fetch_sentiment(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<f64, SentraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(SentraderError::upstream("sentiment data", reason.clone()));
        }
        self.scores
            .get(ticker)
            .copied()
            .ok_or_else(|| SentraderError::NoSentiment {
                ticker: ticker.to_string(),
                start: start_date,
                end: end_date,
            })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(ticker: &str, date: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        ticker: ticker.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000,
    }
}

/// One bar per calendar day from 2024-01-01.
pub fn bars_from_closes(ticker: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    let start = date(2024, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            ticker: ticker.to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        })
        .collect()
}

/// `count` closes evenly spaced from `from` to `to` inclusive.
pub fn linear_closes(from: f64, to: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| from + (to - from) * i as f64 / (count - 1) as f64)
        .collect()
}

/// 100 down to 50 over 30 bars, then up to 150 over 30 more.
pub fn v_shape_closes() -> Vec<f64> {
    let mut closes = linear_closes(100.0, 50.0, 30);
    closes.extend((0..30).map(|j| 50.0 + 100.0 * (j + 1) as f64 / 30.0));
    closes
}

/// Fast crossover params for short fixtures.
pub fn quick_params(base_percent: f64, sentiment_scale: f64) -> StrategyParams {
    StrategyParams {
        short_period: 1,
        long_period: 2,
        base_percent,
        sentiment_scale,
    }
}

pub fn universe_config(params: StrategyParams) -> UniverseConfig {
    UniverseConfig {
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        initial_capital: 10_000.0,
        params,
        max_tickers: None,
        parallel: false,
    }
}
