//! Strategy metrics summarizer — aggregate quality of a flat trade list,
//! historical or simulated.

use serde::{Deserialize, Serialize};

use crate::domain::Trade;
use crate::math::profit_factor;

/// Aggregate strategy quality metrics. `win_rate` is a fraction in [0, 1];
/// `average_loss` and `total_loss` are magnitudes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyMetrics {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    pub win_rate: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub profit_factor: f64,
    pub expectancy: f64,
    pub net_profit: f64,
    pub total_profit: f64,
    pub total_loss: f64,
    pub largest_win: f64,
    /// Most negative single-trade profit/loss; 0 with no losses.
    pub largest_loss: f64,
}

/// Summarize a list of closed trades by partitioning on profit/loss sign.
/// Empty input (or all-open input) returns the all-zero struct.
pub fn summarize(trades: &[Trade]) -> StrategyMetrics {
    let pnls: Vec<f64> = trades
        .iter()
        .filter(|t| t.is_closed())
        .map(|t| t.pnl())
        .collect();
    if pnls.is_empty() {
        return StrategyMetrics::default();
    }

    let wins: Vec<f64> = pnls.iter().copied().filter(|&p| p > 0.0).collect();
    let losses: Vec<f64> = pnls.iter().copied().filter(|&p| p < 0.0).collect();
    let breakeven = pnls.len() - wins.len() - losses.len();

    let total_profit: f64 = wins.iter().sum();
    let total_loss: f64 = losses.iter().sum::<f64>().abs();

    let win_rate = wins.len() as f64 / pnls.len() as f64;
    let average_win = if wins.is_empty() {
        0.0
    } else {
        total_profit / wins.len() as f64
    };
    let average_loss = if losses.is_empty() {
        0.0
    } else {
        total_loss / losses.len() as f64
    };

    StrategyMetrics {
        total_trades: pnls.len(),
        winning_trades: wins.len(),
        losing_trades: losses.len(),
        breakeven_trades: breakeven,
        win_rate,
        average_win,
        average_loss,
        profit_factor: profit_factor(total_profit, total_loss),
        expectancy: win_rate * average_win - (1.0 - win_rate) * average_loss,
        net_profit: total_profit - total_loss,
        total_profit,
        total_loss,
        largest_win: wins.iter().copied().fold(0.0, f64::max),
        largest_loss: losses.iter().copied().fold(0.0, f64::min),
    }
}
