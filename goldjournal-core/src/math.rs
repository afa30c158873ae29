//! Trading math primitives — pure functions that compute sizing and edge
//! statistics.
//!
//! Every function is total over its documented domain and fails with
//! `MathError` outside it. No function here touches account state; the risk
//! engine layers that on top.

use thiserror::Error;

/// Profit factor reported when there are gross profits but no gross losses.
/// A finite sentinel keeps the value serializable and comparable.
pub const PROFIT_FACTOR_CAP: f64 = 999.0;

/// Out-of-domain numeric input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be within [{lo}, {hi}], got {value}")]
    OutOfRange {
        name: &'static str,
        lo: f64,
        hi: f64,
        value: f64,
    },
    #[error("entry and stop price must differ")]
    ZeroStopDistance,
    #[error("{name} must be a finite number")]
    NotFinite { name: &'static str },
}

fn require_finite(name: &'static str, value: f64) -> Result<(), MathError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MathError::NotFinite { name })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), MathError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(MathError::NonPositive { name, value })
    }
}

fn require_unit_interval(name: &'static str, value: f64) -> Result<(), MathError> {
    require_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MathError::OutOfRange {
            name,
            lo: 0.0,
            hi: 1.0,
            value,
        })
    }
}

/// Position size in units from account risk:
/// `(balance * risk_pct / 100) / |entry - stop|`.
///
/// `risk_pct` is a percentage in (0, 100]. Fails if entry equals stop.
pub fn position_size(balance: f64, risk_pct: f64, entry: f64, stop: f64) -> Result<f64, MathError> {
    require_positive("balance", balance)?;
    require_finite("risk_pct", risk_pct)?;
    if risk_pct <= 0.0 || risk_pct > 100.0 {
        return Err(MathError::OutOfRange {
            name: "risk_pct",
            lo: 0.0,
            hi: 100.0,
            value: risk_pct,
        });
    }
    require_positive("entry", entry)?;
    require_finite("stop", stop)?;

    let distance = (entry - stop).abs();
    if distance == 0.0 {
        return Err(MathError::ZeroStopDistance);
    }
    Ok(balance * (risk_pct / 100.0) / distance)
}

/// Reward distance over risk distance: `|entry - target| / |entry - stop|`.
pub fn risk_reward_ratio(entry: f64, stop: f64, target: f64) -> Result<f64, MathError> {
    require_finite("entry", entry)?;
    require_finite("stop", stop)?;
    require_finite("target", target)?;

    let risk = (entry - stop).abs();
    if risk == 0.0 {
        return Err(MathError::ZeroStopDistance);
    }
    Ok((entry - target).abs() / risk)
}

/// Expected value of a trade: `win_prob * profit - (1 - win_prob) * loss`.
///
/// `loss` is a magnitude (positive for a losing outcome).
pub fn expected_value(win_prob: f64, profit: f64, loss: f64) -> Result<f64, MathError> {
    require_unit_interval("win_prob", win_prob)?;
    require_finite("profit", profit)?;
    require_finite("loss", loss)?;
    Ok(win_prob * profit - (1.0 - win_prob) * loss)
}

/// Kelly criterion: `(b*p - q) / b` where b is the payoff ratio, clamped to
/// zero. A negative edge reports 0, never a negative sizing signal.
pub fn kelly_criterion(win_prob: f64, rr_ratio: f64) -> Result<f64, MathError> {
    require_unit_interval("win_prob", win_prob)?;
    require_positive("rr_ratio", rr_ratio)?;

    let kelly = (rr_ratio * win_prob - (1.0 - win_prob)) / rr_ratio;
    Ok(kelly.max(0.0))
}

/// Maximum drawdown of an equity series as a percentage of the running peak.
///
/// Single forward pass; drawdown is measured against the prior peak only.
/// Returns 0.0 for series shorter than two points.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let mut peak = equity[0];
    let mut max_dd = 0.0_f64;

    for &value in &equity[1..] {
        if value > peak {
            peak = value;
        } else if peak > 0.0 {
            let dd = (peak - value) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Gross profit over gross loss from partitioned magnitudes.
///
/// `total_losses` is a magnitude. No losses: [`PROFIT_FACTOR_CAP`] if there
/// is any profit, else 0.0.
pub fn profit_factor(total_wins: f64, total_losses: f64) -> f64 {
    if total_losses == 0.0 {
        return if total_wins > 0.0 { PROFIT_FACTOR_CAP } else { 0.0 };
    }
    total_wins / total_losses
}

/// Trades needed for a statistically significant win-rate estimate:
/// `ceil(z^2 * p * (1-p) / e^2)`.
///
/// Supported confidence levels: 0.90, 0.95, 0.99; anything else falls back
/// to the 95% z-score.
pub fn sample_size_for_confidence(
    win_rate: f64,
    confidence_level: f64,
    margin_of_error: f64,
) -> Result<u64, MathError> {
    require_unit_interval("win_rate", win_rate)?;
    require_unit_interval("confidence_level", confidence_level)?;
    require_positive("margin_of_error", margin_of_error)?;

    let z = match (confidence_level * 100.0).round() as i64 {
        90 => 1.645,
        95 => 1.96,
        99 => 2.576,
        _ => 1.96,
    };
    let p = win_rate;
    let e = margin_of_error;
    Ok(((z * z * p * (1.0 - p)) / (e * e)).ceil() as u64)
}

/// Round to 2 decimal places. Applied to currency values at the boundary
/// only, never inside aggregations.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
