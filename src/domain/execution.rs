//! Order execution against the simulated portfolio.
//!
//! Orders fill at the signalling bar's close. There are no commissions and no
//! slippage, so a buy moves exactly `quantity * close` out of cash and a sell
//! moves exactly `quantity * close` back in.

use super::ohlcv::OhlcvBar;
use super::portfolio::Portfolio;
use super::position::{ClosedTrade, Position};
use super::sizing::PositionSizer;

/// Result of an entry attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryResult {
    Entered {
        quantity: i64,
        execution_price: f64,
        cost: f64,
    },
    /// Sizing came out at zero shares; nothing was bought.
    ZeroQuantity,
    AlreadyLong,
}

/// Enter a long position.
///
/// 1. Refuse if a position is already open
/// 2. Size with current cash at the bar close
/// 3. If quantity == 0, return ZeroQuantity
/// 4. Deduct cost from cash and open the position
pub fn enter_long(portfolio: &mut Portfolio, bar: &OhlcvBar, sizer: &PositionSizer) -> EntryResult {
    if portfolio.position.is_some() {
        return EntryResult::AlreadyLong;
    }

    let execution_price = bar.close;
    let quantity = sizer.quantity(portfolio.cash, execution_price);
    if quantity == 0 {
        return EntryResult::ZeroQuantity;
    }

    let cost = quantity as f64 * execution_price;
    portfolio.cash -= cost;
    portfolio.position = Some(Position {
        ticker: portfolio.ticker.clone(),
        quantity,
        entry_price: execution_price,
        entry_date: bar.date,
    });

    EntryResult::Entered {
        quantity,
        execution_price,
        cost,
    }
}

/// Result of an exit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitResult {
    pub quantity: i64,
    pub exit_price: f64,
    pub exit_value: f64,
    pub pnl: f64,
    pub holding_days: i64,
}

/// Sell the whole position at the bar close and record the closed trade.
pub fn exit_position(portfolio: &mut Portfolio, bar: &OhlcvBar) -> Option<ExitResult> {
    let position = portfolio.position.take()?;

    let exit_price = bar.close;
    let exit_value = position.market_value(exit_price);
    let pnl = exit_value - position.cost_basis();

    let trade = ClosedTrade {
        ticker: position.ticker,
        quantity: position.quantity,
        entry_price: position.entry_price,
        exit_price,
        entry_date: position.entry_date,
        exit_date: bar.date,
        pnl,
    };
    let holding_days = trade.holding_days();

    portfolio.cash += exit_value;
    portfolio.record_trade(trade);

    Some(ExitResult {
        quantity: position.quantity,
        exit_price,
        exit_value,
        pnl,
        holding_days,
    })
}
