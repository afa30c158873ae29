//! Position sizing bound to an account balance, with R-multiple targets.

use serde::{Deserialize, Serialize};

use super::RiskError;
use crate::domain::Direction;
use crate::math::round2;

/// Computed sizing for a prospective trade. A pure value object: nothing
/// here is persisted, the caller serializes or discards it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizeResult {
    pub account_value: f64,
    pub risk_percent: f64,
    pub dollar_risk: f64,
    pub price_difference: f64,
    pub position_size: f64,
    pub position_value: f64,
    pub leverage_used: f64,
    /// 1R is the entry price itself by journal convention.
    pub risk_reward_1r: f64,
    pub risk_reward_2r: f64,
    pub risk_reward_3r: f64,
}

impl PositionSizeResult {
    /// Copy with currency fields rounded to 2 decimals for display.
    pub fn rounded(&self) -> Self {
        Self {
            account_value: self.account_value,
            risk_percent: self.risk_percent,
            dollar_risk: round2(self.dollar_risk),
            price_difference: round2(self.price_difference),
            position_size: round2(self.position_size),
            position_value: round2(self.position_value),
            leverage_used: round2(self.leverage_used),
            risk_reward_1r: round2(self.risk_reward_1r),
            risk_reward_2r: round2(self.risk_reward_2r),
            risk_reward_3r: round2(self.risk_reward_3r),
        }
    }
}

/// Size a trade from account balance and risk percent.
///
/// Validates every input and the stop placement for the stated direction
/// (`stop < entry` for long, `stop > entry` for short); violations fail with
/// [`RiskError`] and are never silently coerced. Values are unrounded —
/// display rounding happens at the boundary via [`PositionSizeResult::rounded`].
pub fn calculate_position_size(
    account_balance: f64,
    risk_percent: f64,
    entry_price: f64,
    stop_loss_price: f64,
    direction: Direction,
) -> Result<PositionSizeResult, RiskError> {
    for (name, value) in [
        ("account_balance", account_balance),
        ("risk_percent", risk_percent),
        ("entry_price", entry_price),
        ("stop_loss_price", stop_loss_price),
    ] {
        if !value.is_finite() {
            return Err(RiskError::NotFinite(name));
        }
    }
    if account_balance <= 0.0 {
        return Err(RiskError::NonPositiveBalance(account_balance));
    }
    if risk_percent <= 0.0 || risk_percent > 100.0 {
        return Err(RiskError::RiskPercentOutOfRange(risk_percent));
    }
    if entry_price <= 0.0 {
        return Err(RiskError::NonPositiveEntry(entry_price));
    }
    let stop_ok = match direction {
        Direction::Long => stop_loss_price < entry_price,
        Direction::Short => stop_loss_price > entry_price,
    };
    if !stop_ok {
        return Err(RiskError::StopOnWrongSide {
            entry: entry_price,
            stop: stop_loss_price,
            direction,
        });
    }

    let dollar_risk = account_balance * (risk_percent / 100.0);
    let price_difference = (entry_price - stop_loss_price).abs();
    let position_size = dollar_risk / price_difference;
    let position_value = position_size * entry_price;

    // R-multiple targets extrapolate in the trade's favorable direction.
    let r_multiple = |r: f64| match direction {
        Direction::Long => entry_price + price_difference * r,
        Direction::Short => entry_price - price_difference * r,
    };

    Ok(PositionSizeResult {
        account_value: account_balance,
        risk_percent,
        dollar_risk,
        price_difference,
        position_size,
        position_value,
        leverage_used: position_value / account_balance,
        risk_reward_1r: entry_price,
        risk_reward_2r: r_multiple(2.0),
        risk_reward_3r: r_multiple(3.0),
    })
}
