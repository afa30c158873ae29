//! Risk limit checks for a prospective trade.
//!
//! Four independent checks run without short-circuiting so the caller gets
//! every applicable warning in one pass: per-trade risk, aggregate risk,
//! concurrent position count, and same-direction correlation.

use serde::{Deserialize, Serialize};

use super::exposure::RiskExposure;
use crate::domain::{Direction, RiskSettings};
use crate::math::round2;

/// A prospective trade being evaluated against the account's limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTrade {
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: Option<f64>,
    pub position_size: f64,
}

/// Outcome of a limit check. `within_limits` is false if any check failed;
/// `warnings` carries one message per violated limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLimitCheck {
    pub within_limits: bool,
    pub trade_risk_percent: Option<f64>,
    pub trade_risk_amount: Option<f64>,
    pub total_risk_percent: Option<f64>,
    pub warnings: Vec<String>,
}

/// Evaluate `candidate` against the user's risk settings and current open
/// exposure.
///
/// A candidate without a stop loss cannot be risk-quantified: numeric checks
/// are skipped and the result is within limits with a single advisory
/// warning.
pub fn check_risk_limits(
    candidate: &CandidateTrade,
    settings: &RiskSettings,
    exposure: &RiskExposure,
    account_balance: f64,
) -> RiskLimitCheck {
    let Some(stop_loss) = candidate.stop_loss else {
        return RiskLimitCheck {
            within_limits: true,
            trade_risk_percent: None,
            trade_risk_amount: None,
            total_risk_percent: None,
            warnings: vec!["No stop loss provided, unable to verify risk limits".into()],
        };
    };

    let risk_amount = (candidate.entry_price - stop_loss).abs() * candidate.position_size;
    let risk_percent = risk_amount / account_balance * 100.0;
    let new_total_risk_percent = exposure.total_risk_percent + risk_percent;

    let mut warnings = Vec::new();
    let mut within_limits = true;

    if risk_percent > settings.max_risk_percent {
        warnings.push(format!(
            "Trade risk ({:.2}%) exceeds maximum position risk ({}%)",
            risk_percent, settings.max_risk_percent
        ));
        within_limits = false;
    }

    if new_total_risk_percent > settings.max_daily_risk {
        warnings.push(format!(
            "Total risk exposure ({:.2}%) would exceed maximum daily risk ({}%)",
            new_total_risk_percent, settings.max_daily_risk
        ));
        within_limits = false;
    }

    if exposure.open_positions >= settings.max_positions {
        warnings.push(format!(
            "Maximum number of concurrent positions ({}) already reached",
            settings.max_positions
        ));
        within_limits = false;
    }

    if exposure.count_in_direction(candidate.direction) >= settings.correlation_limit {
        warnings.push(format!(
            "Maximum number of correlated positions ({}) in same direction would be exceeded",
            settings.correlation_limit
        ));
        within_limits = false;
    }

    RiskLimitCheck {
        within_limits,
        trade_risk_percent: Some(round2(risk_percent)),
        trade_risk_amount: Some(round2(risk_amount)),
        total_risk_percent: Some(round2(new_total_risk_percent)),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trade;
    use crate::risk::exposure::current_risk_exposure;
    use chrono::{TimeZone, Utc};

    fn candidate(risk_amount_on_10k: f64) -> CandidateTrade {
        // Entry 2000, 10-point stop distance, size scaled to reach the
        // requested currency risk.
        CandidateTrade {
            direction: Direction::Long,
            entry_price: 2000.0,
            stop_loss: Some(1990.0),
            position_size: risk_amount_on_10k / 10.0,
        }
    }

    fn open_trade(direction: Direction, size: f64) -> Trade {
        Trade::open(
            direction,
            2000.0,
            size,
            Some(1990.0),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn within_all_limits() {
        let check = check_risk_limits(
            &candidate(100.0), // 1% on 10k
            &RiskSettings::default(),
            &RiskExposure::empty(),
            10_000.0,
        );
        assert!(check.within_limits);
        assert!(check.warnings.is_empty());
        assert_eq!(check.trade_risk_percent, Some(1.0));
        assert_eq!(check.trade_risk_amount, Some(100.0));
    }

    #[test]
    fn per_trade_risk_violation_reported() {
        // 3% against max_risk_percent = 2
        let check = check_risk_limits(
            &candidate(300.0),
            &RiskSettings::default(),
            &RiskExposure::empty(),
            10_000.0,
        );
        assert!(!check.within_limits);
        assert!(!check.warnings.is_empty());
        assert!(check.warnings[0].contains("maximum position risk"));
    }

    #[test]
    fn all_violations_collected_together() {
        let settings = RiskSettings {
            max_risk_percent: 1.0,
            max_daily_risk: 2.0,
            max_positions: 2,
            correlation_limit: 1,
            ..RiskSettings::default()
        };
        let open = vec![
            open_trade(Direction::Long, 10.0),
            open_trade(Direction::Long, 10.0),
        ];
        let exposure = current_risk_exposure(&open, 10_000.0);

        let check = check_risk_limits(&candidate(200.0), &settings, &exposure, 10_000.0);
        assert!(!check.within_limits);
        // Per-trade, daily, max positions, and correlation all violated
        assert_eq!(check.warnings.len(), 4);
    }

    #[test]
    fn missing_stop_loss_is_advisory_only() {
        let c = CandidateTrade {
            direction: Direction::Long,
            entry_price: 2000.0,
            stop_loss: None,
            position_size: 100.0,
        };
        let check = check_risk_limits(
            &c,
            &RiskSettings::default(),
            &RiskExposure::empty(),
            10_000.0,
        );
        assert!(check.within_limits);
        assert_eq!(check.warnings.len(), 1);
        assert!(check.trade_risk_percent.is_none());
    }

    #[test]
    fn aggregate_risk_includes_existing_exposure() {
        // Existing 4% exposure + candidate 1.5% exceeds 5% daily cap
        let open = vec![open_trade(Direction::Short, 40.0)];
        let exposure = current_risk_exposure(&open, 10_000.0);
        assert_eq!(exposure.total_risk_percent, 4.0);

        let check = check_risk_limits(
            &candidate(150.0),
            &RiskSettings::default(),
            &exposure,
            10_000.0,
        );
        assert!(!check.within_limits);
        assert_eq!(check.total_risk_percent, Some(5.5));
        assert!(check.warnings.iter().any(|w| w.contains("daily risk")));
    }
}
