//! Per-user risk limit configuration.

use serde::{Deserialize, Serialize};

/// Risk limits the limit checker evaluates a prospective trade against.
/// All percentages are in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    /// Risk percent used when a caller does not supply one.
    pub default_risk_percent: f64,
    /// Maximum risk percent for a single trade.
    pub max_risk_percent: f64,
    /// Maximum aggregate risk percent across all open positions.
    pub max_daily_risk: f64,
    /// Maximum number of concurrent open positions.
    pub max_positions: usize,
    /// Maximum number of same-direction concurrent positions.
    pub correlation_limit: usize,
    /// Maximum tolerated account drawdown percent.
    pub max_drawdown_percent: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            default_risk_percent: 1.0,
            max_risk_percent: 2.0,
            max_daily_risk: 5.0,
            max_positions: 5,
            correlation_limit: 3,
            max_drawdown_percent: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = RiskSettings::default();
        assert_eq!(s.default_risk_percent, 1.0);
        assert_eq!(s.max_risk_percent, 2.0);
        assert_eq!(s.max_daily_risk, 5.0);
        assert_eq!(s.max_positions, 5);
        assert_eq!(s.correlation_limit, 3);
        assert_eq!(s.max_drawdown_percent, 10.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let s: RiskSettings = serde_json::from_str(r#"{"max_risk_percent": 3.0}"#).unwrap();
        assert_eq!(s.max_risk_percent, 3.0);
        assert_eq!(s.max_positions, 5);
    }
}
