//! Backtest engine and bar-by-bar event loop.
//!
//! The engine is a two-state machine (Flat, Long). Every run builds its own
//! [`Portfolio`] and [`SignalGenerator`], so nothing carries over between runs.

use super::error::SentraderError;
use super::execution::{enter_long, exit_position, EntryResult};
use super::ohlcv::{validate_series, OhlcvBar};
use super::portfolio::Portfolio;
use super::signal::{Signal, SignalGenerator};
use super::sizing::PositionSizer;
use super::strategy::StrategyParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Flat,
    Long,
}

/// Terminal cash and mark-to-market value of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    pub final_cash: f64,
    pub final_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub summary: SimulationResult,
    pub final_state: EngineState,
    pub portfolio: Portfolio,
}

#[derive(Debug, Clone)]
pub struct BacktestEngine {
    short_period: usize,
    long_period: usize,
    initial_capital: f64,
    sizer: PositionSizer,
}

impl BacktestEngine {
    pub fn new(params: &StrategyParams, sizer: PositionSizer, initial_capital: f64) -> Self {
        Self {
            short_period: params.short_period,
            long_period: params.long_period,
            initial_capital,
            sizer,
        }
    }

    pub fn run(&self, ticker: &str, bars: &[OhlcvBar]) -> Result<BacktestResult, SentraderError> {
        validate_series(ticker, bars)?;

        let mut signals = SignalGenerator::new(self.short_period, self.long_period)?;
        let mut portfolio = Portfolio::new(ticker, self.initial_capital);
        let mut state = EngineState::Flat;

        for bar in bars {
            let signal = signals.update(bar);
            state = self.step(state, signal, &mut portfolio, bar);
            portfolio.record_equity(bar.date, portfolio.value(bar));
        }

        // validate_series guarantees at least one bar.
        let last = &bars[bars.len() - 1];
        let summary = SimulationResult {
            final_cash: portfolio.cash,
            final_value: portfolio.value(last),
        };

        tracing::debug!(
            ticker,
            percent = self.sizer.percent(),
            trades = portfolio.closed_trades.len(),
            final_cash = summary.final_cash,
            final_value = summary.final_value,
            "backtest finished"
        );

        Ok(BacktestResult {
            summary,
            final_state: state,
            portfolio,
        })
    }

    fn step(
        &self,
        state: EngineState,
        signal: Signal,
        portfolio: &mut Portfolio,
        bar: &OhlcvBar,
    ) -> EngineState {
        match (state, signal) {
            (EngineState::Flat, Signal::Bullish) => {
                match enter_long(portfolio, bar, &self.sizer) {
                    EntryResult::Entered {
                        quantity,
                        execution_price,
                        cost,
                    } => {
                        tracing::debug!(
                            ticker = %portfolio.ticker,
                            date = %bar.date,
                            quantity,
                            price = execution_price,
                            cost,
                            "buy"
                        );
                        EngineState::Long
                    }
                    EntryResult::ZeroQuantity => {
                        tracing::debug!(
                            ticker = %portfolio.ticker,
                            date = %bar.date,
                            cash = portfolio.cash,
                            price = bar.close,
                            "bullish crossover sized to zero shares"
                        );
                        EngineState::Flat
                    }
                    EntryResult::AlreadyLong => EngineState::Long,
                }
            }
            (EngineState::Long, Signal::Bearish) => match exit_position(portfolio, bar) {
                Some(exit) => {
                    tracing::debug!(
                        ticker = %portfolio.ticker,
                        date = %bar.date,
                        quantity = exit.quantity,
                        price = exit.exit_price,
                        pnl = exit.pnl,
                        held_days = exit.holding_days,
                        "sell"
                    );
                    EngineState::Flat
                }
                None => EngineState::Flat,
            },
            (state, _) => state,
        }
    }
}
