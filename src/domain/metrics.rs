//! Per-run performance metrics and the cross-ticker summary.

use super::comparison::ComparisonRecord;
use super::portfolio::{EquityPoint, Portfolio};

#[derive(Debug, Clone, PartialEq)]
pub struct RunMetrics {
    pub total_return: f64,
    pub total_trades: usize,
    pub trades_won: usize,
    pub win_rate: f64,
    pub max_drawdown: f64,
}

impl RunMetrics {
    pub fn compute(portfolio: &Portfolio) -> Self {
        let initial_capital = portfolio.initial_capital;
        let final_equity = portfolio
            .equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial_capital);

        let total_return = if initial_capital > 0.0 {
            (final_equity - initial_capital) / initial_capital
        } else {
            0.0
        };

        let total_trades = portfolio.closed_trades.len();
        let trades_won = portfolio
            .closed_trades
            .iter()
            .filter(|t| t.pnl > 0.0)
            .count();
        let win_rate = if total_trades > 0 {
            trades_won as f64 / total_trades as f64
        } else {
            0.0
        };

        RunMetrics {
            total_return,
            total_trades,
            trades_won,
            win_rate,
            max_drawdown: compute_drawdown(&portfolio.equity_curve),
        }
    }
}

/// Largest peak-to-trough fall as a fraction of the peak.
fn compute_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let Some(first) = equity_curve.first() else {
        return 0.0;
    };

    let mut peak = first.equity;
    let mut max_dd = 0.0_f64;
    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            max_dd = max_dd.max((peak - point.equity) / peak);
        }
    }
    max_dd
}

/// Aggregate over every ticker that produced a [`ComparisonRecord`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniverseSummary {
    pub total: usize,
    pub better_count: usize,
    pub worse_count: usize,
    pub better_fraction: f64,
    pub avg_diff_cash: f64,
    pub avg_diff_value: f64,
    /// Mean diff_value over records where `is_better`.
    pub avg_gain: f64,
    /// Mean diff_value over records where not `is_better`.
    pub avg_loss: f64,
}

impl UniverseSummary {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ComparisonRecord>,
    {
        let mut total = 0usize;
        let mut better_count = 0usize;
        let mut sum_diff_cash = 0.0_f64;
        let mut sum_diff_value = 0.0_f64;
        let mut sum_gain = 0.0_f64;
        let mut sum_loss = 0.0_f64;

        for record in records {
            total += 1;
            sum_diff_cash += record.diff_cash;
            sum_diff_value += record.diff_value;
            if record.is_better {
                better_count += 1;
                sum_gain += record.diff_value;
            } else {
                sum_loss += record.diff_value;
            }
        }

        let worse_count = total - better_count;
        UniverseSummary {
            total,
            better_count,
            worse_count,
            better_fraction: mean(better_count as f64, total),
            avg_diff_cash: mean(sum_diff_cash, total),
            avg_diff_value: mean(sum_diff_value, total),
            avg_gain: mean(sum_gain, better_count),
            avg_loss: mean(sum_loss, worse_count),
        }
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}
