//! Win/loss breakdown grouped by a categorical factor.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use super::AnalyticsError;
use crate::domain::Trade;

/// Grouping dimension for [`win_loss_by_factor`]. The last five come from
/// the trade's pre/post-analysis journal annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Direction,
    DayOfWeek,
    TimeOfDay,
    DailyTrend,
    HtfSetup,
    CleanRange,
    VolumeTime,
    EmotionalState,
}

impl FromStr for Factor {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direction" => Ok(Self::Direction),
            "day_of_week" => Ok(Self::DayOfWeek),
            "time_of_day" => Ok(Self::TimeOfDay),
            "daily_trend" => Ok(Self::DailyTrend),
            "htf_setup" => Ok(Self::HtfSetup),
            "clean_range" => Ok(Self::CleanRange),
            "volume_time" => Ok(Self::VolumeTime),
            "emotional_state" => Ok(Self::EmotionalState),
            other => Err(AnalyticsError::InvalidFactor(other.to_string())),
        }
    }
}

impl Factor {
    /// Group key for one trade. Annotation factors bucket missing values
    /// under "unknown" so every closed trade lands in exactly one group.
    fn key(&self, trade: &Trade) -> String {
        match self {
            Self::Direction => trade.direction.as_str().to_string(),
            Self::DayOfWeek => trade.entry_date.format("%A").to_string(),
            Self::TimeOfDay => trade.entry_date.hour().to_string(),
            Self::DailyTrend => annotation(&trade.pre_analysis.daily_trend),
            Self::HtfSetup => annotation(&trade.pre_analysis.htf_setup),
            Self::CleanRange => annotation(&trade.pre_analysis.clean_range),
            Self::VolumeTime => annotation(&trade.pre_analysis.volume_time),
            Self::EmotionalState => annotation(&trade.post_analysis.emotional_state),
        }
    }
}

fn annotation(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "unknown".to_string())
}

/// Aggregates for one factor group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub factor: String,
    pub trade_count: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub total_pnl: f64,
    pub avg_profit_loss: f64,
    pub win_rate: f64,
}

/// Group closed trades by the named factor; unknown names fail with
/// [`AnalyticsError::InvalidFactor`].
///
/// Groups are ordered by descending average profit/loss. Group counts always
/// sum to the closed-trade count of the input.
pub fn win_loss_by_factor(
    trades: &[Trade],
    factor: &str,
) -> Result<Vec<FactorBreakdown>, AnalyticsError> {
    let factor = Factor::from_str(factor)?;

    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();
    for trade in trades.iter().filter(|t| t.is_closed()) {
        groups.entry(factor.key(trade)).or_default().push(trade.pnl());
    }

    let mut breakdowns: Vec<FactorBreakdown> = groups
        .into_iter()
        .map(|(key, pnls)| {
            let trade_count = pnls.len();
            let winning_trades = pnls.iter().filter(|&&p| p > 0.0).count();
            let losing_trades = pnls.iter().filter(|&&p| p < 0.0).count();
            let total_pnl: f64 = pnls.iter().sum();
            FactorBreakdown {
                factor: key,
                trade_count,
                winning_trades,
                losing_trades,
                total_pnl,
                avg_profit_loss: total_pnl / trade_count as f64,
                win_rate: winning_trades as f64 / trade_count as f64 * 100.0,
            }
        })
        .collect();

    breakdowns.sort_by(|a, b| {
        b.avg_profit_loss
            .partial_cmp(&a.avg_profit_loss)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(breakdowns)
}
