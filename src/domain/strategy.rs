//! Crossover strategy parameters.

use super::sizing::{PositionSizer, SentimentScore};

pub const DEFAULT_SHORT_PERIOD: usize = 15;
pub const DEFAULT_LONG_PERIOD: usize = 30;
pub const DEFAULT_BASE_PERCENT: f64 = 50.0;
pub const DEFAULT_SENTIMENT_SCALE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub short_period: usize,
    pub long_period: usize,
    pub base_percent: f64,
    pub sentiment_scale: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            short_period: DEFAULT_SHORT_PERIOD,
            long_period: DEFAULT_LONG_PERIOD,
            base_percent: DEFAULT_BASE_PERCENT,
            sentiment_scale: DEFAULT_SENTIMENT_SCALE,
        }
    }
}

impl StrategyParams {
    pub fn baseline_sizer(&self) -> PositionSizer {
        PositionSizer::baseline(self.base_percent)
    }

    pub fn adjusted_sizer(&self, sentiment: SentimentScore) -> PositionSizer {
        PositionSizer::with_sentiment(self.base_percent, sentiment, self.sentiment_scale)
    }
}
