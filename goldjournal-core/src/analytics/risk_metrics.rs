//! Consolidated risk metrics over a closed-trade history.

use serde::{Deserialize, Serialize};

use super::closed_by_exit_date;
use crate::domain::Trade;
use crate::math::{round2, PROFIT_FACTOR_CAP};

/// Consolidated account-level risk metrics. Drawdowns are in currency units
/// (distance of the running profit/loss balance from its peak).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub average_profit: f64,
    /// Mean of losing-trade profit/loss; negative when losses exist.
    pub average_loss: f64,
    pub max_drawdown: f64,
    pub current_drawdown: f64,
    pub average_risk_reward_ratio: f64,
    pub average_risked_amount: f64,
    pub expectancy: f64,
    pub sharpe_ratio: f64,
    pub total_profit_loss: f64,
}

impl RiskMetrics {
    /// Copy with display fields rounded to 2 decimals.
    pub fn rounded(&self) -> Self {
        Self {
            total_trades: self.total_trades,
            winning_trades: self.winning_trades,
            losing_trades: self.losing_trades,
            win_rate: round2(self.win_rate),
            profit_factor: round2(self.profit_factor),
            average_profit: round2(self.average_profit),
            average_loss: round2(self.average_loss),
            max_drawdown: round2(self.max_drawdown),
            current_drawdown: round2(self.current_drawdown),
            average_risk_reward_ratio: round2(self.average_risk_reward_ratio),
            average_risked_amount: round2(self.average_risked_amount),
            expectancy: round2(self.expectancy),
            sharpe_ratio: round2(self.sharpe_ratio),
            total_profit_loss: round2(self.total_profit_loss),
        }
    }
}

/// Aggregate a closed-trade history into consolidated risk metrics.
///
/// Trades are processed chronologically ascending by exit date so the
/// running-balance drawdown matches the true equity curve regardless of the
/// order the caller supplies them in. Empty input returns the all-zero
/// default; this function never fails.
pub fn risk_metrics(trades: &[Trade]) -> RiskMetrics {
    let closed = closed_by_exit_date(trades);
    if closed.is_empty() {
        return RiskMetrics::default();
    }

    let mut winning_trades = 0_usize;
    let mut losing_trades = 0_usize;
    let mut total_profit = 0.0;
    let mut total_loss = 0.0;
    let mut max_drawdown = 0.0_f64;
    let mut current_drawdown = 0.0_f64;
    let mut peak_balance = 0.0_f64;
    let mut running_balance = 0.0_f64;
    let mut rr_ratios: Vec<f64> = Vec::new();
    let mut risked_amounts: Vec<f64> = Vec::new();

    for trade in &closed {
        let pnl = trade.pnl();

        if pnl > 0.0 {
            winning_trades += 1;
            total_profit += pnl;
        } else {
            losing_trades += 1;
            total_loss += pnl;
        }

        running_balance += pnl;
        if running_balance > peak_balance {
            peak_balance = running_balance;
            current_drawdown = 0.0;
        } else {
            current_drawdown = peak_balance - running_balance;
            if current_drawdown > max_drawdown {
                max_drawdown = current_drawdown;
            }
        }

        // Realized risk/reward only makes sense for stop-bearing trades.
        if let Some(risk) = trade.risk_amount() {
            let ratio = pnl.abs() / risk;
            if ratio.is_finite() {
                rr_ratios.push(ratio);
            }
            if risk.is_finite() {
                risked_amounts.push(risk);
            }
        }
    }

    let count = closed.len();
    let returns: Vec<f64> = closed.iter().map(|t| t.pnl()).collect();
    let avg_return = returns.iter().sum::<f64>() / count as f64;
    let std_dev = sample_std_dev(&returns, avg_return);

    let profit_factor = if total_loss.abs() > 0.0 {
        (total_profit / total_loss).abs()
    } else if total_profit > 0.0 {
        PROFIT_FACTOR_CAP
    } else {
        0.0
    };

    RiskMetrics {
        total_trades: count,
        winning_trades,
        losing_trades,
        win_rate: winning_trades as f64 / count as f64 * 100.0,
        profit_factor,
        average_profit: if winning_trades > 0 {
            total_profit / winning_trades as f64
        } else {
            0.0
        },
        average_loss: if losing_trades > 0 {
            total_loss / losing_trades as f64
        } else {
            0.0
        },
        max_drawdown,
        current_drawdown,
        average_risk_reward_ratio: mean(&rr_ratios),
        average_risked_amount: mean(&risked_amounts),
        expectancy: (total_profit + total_loss) / count as f64,
        sharpe_ratio: if std_dev > 0.0 { avg_return / std_dev } else { 0.0 },
        total_profit_loss: total_profit + total_loss,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (Bessel's correction); 0 for fewer than 2 values.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use chrono::{TimeZone, Utc};

    fn closed_trade(pnl: f64, day: u32) -> Trade {
        closed_trade_with_stop(pnl, day, None)
    }

    fn closed_trade_with_stop(pnl: f64, day: u32, stop: Option<f64>) -> Trade {
        let entry = Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();
        let mut trade = Trade::open(Direction::Long, 2000.0, 1.0, stop, entry);
        trade.close(
            2000.0 + pnl,
            Utc.with_ymd_and_hms(2024, 1, day, 16, 0, 0).unwrap(),
        );
        trade
    }

    #[test]
    fn empty_input_returns_zero_struct() {
        assert_eq!(risk_metrics(&[]), RiskMetrics::default());
    }

    #[test]
    fn counts_and_averages() {
        let trades = vec![
            closed_trade(200.0, 1),
            closed_trade(-100.0, 2),
            closed_trade(100.0, 3),
        ];
        let m = risk_metrics(&trades);
        assert_eq!(m.total_trades, 3);
        assert_eq!(m.winning_trades, 2);
        assert_eq!(m.losing_trades, 1);
        assert!((m.win_rate - 200.0 / 3.0).abs() < 1e-10);
        assert!((m.average_profit - 150.0).abs() < 1e-10);
        assert!((m.average_loss - (-100.0)).abs() < 1e-10);
        assert!((m.profit_factor - 3.0).abs() < 1e-10);
        assert!((m.total_profit_loss - 200.0).abs() < 1e-10);
        assert!((m.expectancy - 200.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn breakeven_counted_as_loss() {
        let m = risk_metrics(&[closed_trade(0.0, 1)]);
        assert_eq!(m.losing_trades, 1);
        assert_eq!(m.winning_trades, 0);
        assert_eq!(m.average_loss, 0.0);
        assert_eq!(m.profit_factor, 0.0);
    }

    #[test]
    fn drawdown_is_chronological_regardless_of_input_order() {
        // Chronologically: +200 (peak 200), -150 (dd 150), +50 (dd 100)
        let chronological = vec![
            closed_trade(200.0, 1),
            closed_trade(-150.0, 2),
            closed_trade(50.0, 3),
        ];
        let mut shuffled = chronological.clone();
        shuffled.reverse();

        let m1 = risk_metrics(&chronological);
        let m2 = risk_metrics(&shuffled);
        assert!((m1.max_drawdown - 150.0).abs() < 1e-10);
        assert!((m1.current_drawdown - 100.0).abs() < 1e-10);
        assert_eq!(m1, m2);
    }

    #[test]
    fn no_losses_uses_999_sentinel() {
        let m = risk_metrics(&[closed_trade(100.0, 1), closed_trade(50.0, 2)]);
        assert_eq!(m.profit_factor, 999.0);
        assert_eq!(m.max_drawdown, 0.0);
    }

    #[test]
    fn risk_reward_only_over_stop_bearing_trades() {
        let trades = vec![
            // Risk = |2000-1980| * 1 = 20, reward = 100 → ratio 5
            closed_trade_with_stop(100.0, 1, Some(1980.0)),
            // No stop: excluded from rr aggregates
            closed_trade(40.0, 2),
        ];
        let m = risk_metrics(&trades);
        assert!((m.average_risk_reward_ratio - 5.0).abs() < 1e-10);
        assert!((m.average_risked_amount - 20.0).abs() < 1e-10);
    }

    #[test]
    fn sharpe_zero_for_single_trade_or_constant_returns() {
        let m = risk_metrics(&[closed_trade(100.0, 1)]);
        assert_eq!(m.sharpe_ratio, 0.0);

        let constant = vec![closed_trade(50.0, 1), closed_trade(50.0, 2)];
        assert_eq!(risk_metrics(&constant).sharpe_ratio, 0.0);
    }

    #[test]
    fn sharpe_uses_bessel_correction() {
        let trades = vec![closed_trade(100.0, 1), closed_trade(-100.0, 2)];
        let m = risk_metrics(&trades);
        // mean 0, sample stddev = sqrt((100^2 + 100^2)/1) = 141.42 → sharpe 0
        assert_eq!(m.sharpe_ratio, 0.0);

        let skewed = vec![
            closed_trade(300.0, 1),
            closed_trade(100.0, 2),
            closed_trade(200.0, 3),
        ];
        let m = risk_metrics(&skewed);
        // mean 200, sample stddev = sqrt((100^2 + 100^2 + 0)/2) = 100
        assert!((m.sharpe_ratio - 2.0).abs() < 1e-10);
    }

    #[test]
    fn rounded_copy() {
        let m = RiskMetrics {
            win_rate: 66.666_666,
            sharpe_ratio: 1.23456,
            ..RiskMetrics::default()
        };
        let r = m.rounded();
        assert_eq!(r.win_rate, 66.67);
        assert_eq!(r.sharpe_ratio, 1.23);
    }
}
