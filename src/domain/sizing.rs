//! Percentage position sizing with an optional sentiment tilt.
//!
//! percent = base_percent + 100 * sentiment * sentiment_scale, clamped to [0, 100].
//! quantity = floor(cash * percent / 100 / price), whole shares only.

/// Scalar news sentiment in [-1, 1]. Neutral (0) when nothing is known.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SentimentScore(f64);

impl SentimentScore {
    pub const NEUTRAL: SentimentScore = SentimentScore(0.0);

    /// Non-finite scores become neutral; finite ones are clamped to [-1, 1].
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            SentimentScore(value.clamp(-1.0, 1.0))
        } else {
            Self::NEUTRAL
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_neutral(self) -> bool {
        self.0 == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSizer {
    pub base_percent: f64,
    pub sentiment: SentimentScore,
    pub sentiment_scale: f64,
}

impl PositionSizer {
    /// Flat sizing: sentiment plays no part.
    pub fn baseline(base_percent: f64) -> Self {
        Self {
            base_percent,
            sentiment: SentimentScore::NEUTRAL,
            sentiment_scale: 1.0,
        }
    }

    pub fn with_sentiment(base_percent: f64, sentiment: SentimentScore, sentiment_scale: f64) -> Self {
        Self {
            base_percent,
            sentiment,
            sentiment_scale,
        }
    }

    /// The requested percentage before clamping.
    pub fn raw_percent(&self) -> f64 {
        self.base_percent + 100.0 * self.sentiment.value() * self.sentiment_scale
    }

    pub fn percent(&self) -> f64 {
        let raw = self.raw_percent();
        if raw.is_nan() {
            return 0.0;
        }
        let clamped = raw.clamp(0.0, 100.0);
        if clamped != raw {
            tracing::debug!(requested = raw, applied = clamped, "sizing percent clamped");
        }
        clamped
    }

    /// Whole shares affordable with `percent` of `cash` at `price`. Zero means no order.
    pub fn quantity(&self, cash: f64, price: f64) -> i64 {
        order_quantity(cash, price, self.percent())
    }
}

pub fn order_quantity(cash: f64, price: f64, percent: f64) -> i64 {
    if !(price > 0.0) || !(cash > 0.0) || !(percent > 0.0) {
        return 0;
    }

    let mut quantity = (cash * percent / 100.0 / price).floor() as i64;
    if quantity > 0 && quantity as f64 * price > cash {
        quantity -= 1;
    }
    quantity.max(0)
}
