//! Equity-curve reconstruction from closed trades.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::closed_by_exit_date;
use crate::domain::Trade;

/// One point on the equity curve: a closed trade and the cumulative balance
/// through its exit date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub exit_date: DateTime<Utc>,
    pub profit_loss: f64,
    pub running_balance: f64,
}

/// Reconstruct the equity curve: one point per closed trade, ordered by exit
/// date ascending.
///
/// A point's running balance is the sum of profit/loss over every closed
/// trade with an exit date `<=` its own, so trades sharing an exit date all
/// report the same balance. The curve is not monotone.
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let closed = closed_by_exit_date(trades);

    let mut points = Vec::with_capacity(closed.len());
    let mut running = 0.0;
    let mut i = 0;

    while i < closed.len() {
        // Consume the full group of exit-date ties before emitting points,
        // so ties share one balance.
        let tie_date = closed[i].exit_date;
        let mut j = i;
        while j < closed.len() && closed[j].exit_date == tie_date {
            running += closed[j].pnl();
            j += 1;
        }
        for trade in &closed[i..j] {
            let Some(exit_date) = trade.exit_date else {
                continue;
            };
            points.push(EquityPoint {
                exit_date,
                profit_loss: trade.pnl(),
                running_balance: running,
            });
        }
        i = j;
    }
    points
}
