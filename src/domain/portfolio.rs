//! Single-asset portfolio state and equity tracking.

use chrono::NaiveDate;

use super::ohlcv::OhlcvBar;
use super::position::{ClosedTrade, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub ticker: String,
    pub cash: f64,
    pub initial_capital: f64,
    pub position: Option<Position>,
    pub closed_trades: Vec<ClosedTrade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl Portfolio {
    pub fn new(ticker: &str, initial_capital: f64) -> Self {
        Portfolio {
            ticker: ticker.to_string(),
            cash: initial_capital,
            initial_capital,
            position: None,
            closed_trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn position_quantity(&self) -> i64 {
        self.position.as_ref().map_or(0, |p| p.quantity)
    }

    pub fn is_flat(&self) -> bool {
        self.position.is_none()
    }

    /// cash + quantity * close
    pub fn value(&self, bar: &OhlcvBar) -> f64 {
        self.cash
            + self
                .position
                .as_ref()
                .map_or(0.0, |p| p.market_value(bar.close))
    }

    pub fn record_trade(&mut self, trade: ClosedTrade) {
        self.closed_trades.push(trade);
    }

    pub fn record_equity(&mut self, date: NaiveDate, equity: f64) {
        self.equity_curve.push(EquityPoint { date, equity });
    }
}
