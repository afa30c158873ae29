//! What-if trade scenario analytics.
//!
//! Given a planned entry/stop/target and an assumed win probability, derives
//! the risk, reward, expected value, and a Kelly-based sizing ladder. Account
//! balance is optional; balance-relative figures are `None` without it.

use serde::{Deserialize, Serialize};

use crate::math::{self, round2, MathError};

/// Planned trade parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeScenario {
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub position_size: f64,
    /// Assumed probability of the trade winning; defaults to a coin flip.
    #[serde(default = "default_win_probability")]
    pub win_probability: f64,
    #[serde(default)]
    pub account_balance: Option<f64>,
}

fn default_win_probability() -> f64 {
    0.5
}

/// Derived scenario analytics. Sizing ladder fields scale the full-Kelly
/// size: recommended = half, conservative = quarter, aggressive =
/// three-quarter Kelly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalytics {
    pub risk_amount: f64,
    pub potential_profit: f64,
    pub risk_reward_ratio: f64,
    pub expected_value: f64,
    pub risk_percent: Option<f64>,
    pub kelly_fraction: f64,
    pub kelly_position_size: Option<f64>,
    pub recommended_position_size: Option<f64>,
    pub conservative_position_size: Option<f64>,
    pub aggressive_position_size: Option<f64>,
}

impl ScenarioAnalytics {
    /// Copy with currency fields rounded to 2 decimals for display.
    pub fn rounded(&self) -> Self {
        Self {
            risk_amount: round2(self.risk_amount),
            potential_profit: round2(self.potential_profit),
            risk_reward_ratio: round2(self.risk_reward_ratio),
            expected_value: round2(self.expected_value),
            risk_percent: self.risk_percent.map(round2),
            kelly_fraction: self.kelly_fraction,
            kelly_position_size: self.kelly_position_size.map(round2),
            recommended_position_size: self.recommended_position_size.map(round2),
            conservative_position_size: self.conservative_position_size.map(round2),
            aggressive_position_size: self.aggressive_position_size.map(round2),
        }
    }
}

/// Analyze a planned trade scenario.
pub fn analyze_scenario(scenario: &TradeScenario) -> Result<ScenarioAnalytics, MathError> {
    if scenario.position_size <= 0.0 || !scenario.position_size.is_finite() {
        return Err(MathError::NonPositive {
            name: "position_size",
            value: scenario.position_size,
        });
    }

    let stop_distance = (scenario.entry_price - scenario.stop_loss).abs();
    let risk_amount = stop_distance * scenario.position_size;
    let potential_profit =
        (scenario.entry_price - scenario.take_profit).abs() * scenario.position_size;

    let risk_reward_ratio =
        math::risk_reward_ratio(scenario.entry_price, scenario.stop_loss, scenario.take_profit)?;
    let expected_value =
        math::expected_value(scenario.win_probability, potential_profit, risk_amount)?;
    let kelly_fraction = math::kelly_criterion(scenario.win_probability, risk_reward_ratio)?;

    let balance = scenario.account_balance.filter(|&b| b > 0.0);
    let risk_percent = balance.map(|b| risk_amount / b * 100.0);
    let kelly_position_size = balance.map(|b| kelly_fraction * b / stop_distance);

    Ok(ScenarioAnalytics {
        risk_amount,
        potential_profit,
        risk_reward_ratio,
        expected_value,
        risk_percent,
        kelly_fraction,
        kelly_position_size,
        recommended_position_size: kelly_position_size.map(|s| s * 0.5),
        conservative_position_size: kelly_position_size.map(|s| s * 0.25),
        aggressive_position_size: kelly_position_size.map(|s| s * 0.75),
    })
}
