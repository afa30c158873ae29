//! Open-risk exposure across a set of open positions.

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, Trade};

/// Risk attributed to a single open position. `risk_amount`/`risk_percent`
/// are `None` when the position has no stop loss; such positions are flagged
/// but excluded from the aggregate totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRisk {
    pub direction: Direction,
    pub entry_price: f64,
    pub position_size: f64,
    pub stop_loss: Option<f64>,
    pub risk_amount: Option<f64>,
    pub risk_percent: Option<f64>,
}

/// Aggregate open-risk exposure for an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskExposure {
    pub open_positions: usize,
    pub total_risk_amount: f64,
    pub total_risk_percent: f64,
    pub positions: Vec<PositionRisk>,
}

impl RiskExposure {
    /// Exposure of an account with no open positions.
    pub fn empty() -> Self {
        Self {
            open_positions: 0,
            total_risk_amount: 0.0,
            total_risk_percent: 0.0,
            positions: Vec::new(),
        }
    }

    /// Open positions sharing `direction`.
    pub fn count_in_direction(&self, direction: Direction) -> usize {
        self.positions
            .iter()
            .filter(|p| p.direction == direction)
            .count()
    }
}

/// Compute per-position and aggregate risk for the given open trades.
///
/// Caller supplies the authoritative account balance; percentages are
/// relative to it. Assumes `account_balance > 0`.
pub fn current_risk_exposure(open_trades: &[Trade], account_balance: f64) -> RiskExposure {
    if open_trades.is_empty() {
        return RiskExposure::empty();
    }

    let positions: Vec<PositionRisk> = open_trades
        .iter()
        .map(|trade| {
            let risk_amount = trade.risk_amount();
            PositionRisk {
                direction: trade.direction,
                entry_price: trade.entry_price,
                position_size: trade.position_size,
                stop_loss: trade.stop_loss,
                risk_amount,
                risk_percent: risk_amount.map(|amt| amt / account_balance * 100.0),
            }
        })
        .collect();

    let total_risk_amount: f64 = positions.iter().filter_map(|p| p.risk_amount).sum();

    RiskExposure {
        open_positions: open_trades.len(),
        total_risk_amount,
        total_risk_percent: total_risk_amount / account_balance * 100.0,
        positions,
    }
}
