//! Time-bucketed performance series.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{closed_by_exit_date, AnalyticsError};
use crate::domain::Trade;
use crate::math::PROFIT_FACTOR_CAP;

/// Bucketing granularity for [`performance_over_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl FromStr for Interval {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(AnalyticsError::InvalidInterval(other.to_string())),
        }
    }
}

/// Aggregated performance for one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPerformance {
    pub time_period: String,
    pub trade_count: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub period_pnl: f64,
    pub avg_profit_loss: f64,
    pub max_profit: f64,
    pub max_loss: f64,
    /// Mean profit/loss of winning trades only; 0 if the bucket has no wins.
    pub avg_win: f64,
    /// Mean profit/loss of losing trades only (negative); 0 if no losses.
    pub avg_loss: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
}

/// Bucket closed trades by exit date and aggregate each bucket.
///
/// Periods are returned in chronological ascending order. The bucket's
/// profit factor is `|avg_win / avg_loss|`, with the no-loss sentinel from
/// [`crate::math::PROFIT_FACTOR_CAP`].
pub fn performance_over_time(trades: &[Trade], interval: Interval) -> Vec<PeriodPerformance> {
    // Keys are chosen so lexicographic order equals chronological order,
    // which lets the BTreeMap produce the sorted series directly.
    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for trade in closed_by_exit_date(trades) {
        let Some(exit) = trade.exit_date else {
            continue;
        };
        let key = match interval {
            Interval::Daily => exit.format("%Y-%m-%d").to_string(),
            Interval::Weekly => {
                let week = exit.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Interval::Monthly => exit.format("%Y-%m").to_string(),
            Interval::Yearly => exit.format("%Y").to_string(),
        };
        buckets.entry(key).or_default().push(trade.pnl());
    }

    buckets
        .into_iter()
        .map(|(time_period, pnls)| aggregate_bucket(time_period, &pnls))
        .collect()
}

fn aggregate_bucket(time_period: String, pnls: &[f64]) -> PeriodPerformance {
    let trade_count = pnls.len();
    let wins: Vec<f64> = pnls.iter().copied().filter(|&p| p > 0.0).collect();
    let losses: Vec<f64> = pnls.iter().copied().filter(|&p| p < 0.0).collect();

    let period_pnl: f64 = pnls.iter().sum();
    let avg_win = mean(&wins);
    let avg_loss = mean(&losses);

    let profit_factor = if avg_loss.abs() > 0.0 {
        (avg_win / avg_loss).abs()
    } else if !wins.is_empty() {
        PROFIT_FACTOR_CAP
    } else {
        0.0
    };

    PeriodPerformance {
        time_period,
        trade_count,
        winning_trades: wins.len(),
        losing_trades: losses.len(),
        period_pnl,
        avg_profit_loss: period_pnl / trade_count as f64,
        max_profit: pnls.iter().copied().fold(f64::MIN, f64::max),
        max_loss: pnls.iter().copied().fold(f64::MAX, f64::min),
        avg_win,
        avg_loss,
        win_rate: wins.len() as f64 / trade_count as f64 * 100.0,
        profit_factor,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
