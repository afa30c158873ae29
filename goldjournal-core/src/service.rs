//! Journal service — wires provider lookups into the risk and analytics
//! engines.
//!
//! This is the seam the HTTP layer calls: it resolves account state and
//! settings through the injected [`TradeProvider`] and delegates the math to
//! the pure engines.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::{
    consecutive_stats, equity_curve, performance_over_time, risk_metrics, win_loss_by_factor,
    AnalyticsError, ConsecutiveStats, EquityPoint, FactorBreakdown, Interval, PeriodPerformance,
    RiskMetrics,
};
use crate::domain::Direction;
use crate::provider::{ProviderError, TradeProvider};
use crate::risk::{
    calculate_position_size, check_risk_limits, current_risk_exposure, CandidateTrade,
    PositionSizeResult, RiskError, RiskExposure, RiskLimitCheck,
};
use crate::strategy::{summarize, StrategyMetrics};

/// Errors crossing the service boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Risk(#[from] RiskError),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

/// One-call dashboard aggregate for the journal front page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub metrics: RiskMetrics,
    pub streaks: ConsecutiveStats,
    pub strategy: StrategyMetrics,
    pub equity_curve: Vec<EquityPoint>,
}

/// Provider-backed facade over the engines. Stateless between calls; every
/// method re-reads through the provider.
pub struct JournalService<P: TradeProvider> {
    provider: P,
}

impl<P: TradeProvider> JournalService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Size a trade against the account balance. `risk_percent` falls back
    /// to the user's configured default when not supplied.
    pub fn position_size(
        &self,
        risk_percent: Option<f64>,
        entry_price: f64,
        stop_loss_price: f64,
        direction: Direction,
    ) -> Result<PositionSizeResult, ServiceError> {
        let account = self.provider.account()?;
        let risk_percent = match risk_percent {
            Some(pct) => pct,
            None => self.provider.risk_settings()?.default_risk_percent,
        };
        Ok(calculate_position_size(
            account.current_balance,
            risk_percent,
            entry_price,
            stop_loss_price,
            direction,
        )?)
    }

    /// Current open-risk exposure for the account.
    pub fn risk_exposure(&self) -> Result<RiskExposure, ServiceError> {
        let account = self.provider.account()?;
        let open = self.provider.open_trades()?;
        Ok(current_risk_exposure(&open, account.current_balance))
    }

    /// Evaluate a prospective trade against the stored risk settings and
    /// live exposure.
    pub fn check_limits(&self, candidate: &CandidateTrade) -> Result<RiskLimitCheck, ServiceError> {
        let account = self.provider.account()?;
        let settings = self.provider.risk_settings()?;
        let exposure = self.risk_exposure()?;
        Ok(check_risk_limits(
            candidate,
            &settings,
            &exposure,
            account.current_balance,
        ))
    }

    pub fn performance(&self, interval: Interval) -> Result<Vec<PeriodPerformance>, ServiceError> {
        let closed = self.provider.closed_trades()?;
        Ok(performance_over_time(&closed, interval))
    }

    pub fn win_loss_by_factor(&self, factor: &str) -> Result<Vec<FactorBreakdown>, ServiceError> {
        let closed = self.provider.closed_trades()?;
        Ok(win_loss_by_factor(&closed, factor)?)
    }

    /// Aggregate everything the journal front page shows. The independent
    /// aggregations are all pure, so callers may also issue them
    /// concurrently through the individual methods.
    pub fn dashboard(&self) -> Result<Dashboard, ServiceError> {
        let closed = self.provider.closed_trades()?;
        Ok(Dashboard {
            metrics: risk_metrics(&closed),
            streaks: consecutive_stats(&closed),
            strategy: summarize(&closed),
            equity_curve: equity_curve(&closed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, RiskSettings, Trade};
    use crate::provider::InMemoryProvider;
    use chrono::{TimeZone, Utc};

    fn fixture() -> JournalService<InMemoryProvider> {
        let entry = |day| Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();
        let exit = |day| Utc.with_ymd_and_hms(2024, 1, day, 16, 0, 0).unwrap();

        let mut t1 = Trade::open(Direction::Long, 2000.0, 10.0, Some(1990.0), entry(1));
        t1.close(2020.0, exit(1)); // +200
        let mut t2 = Trade::open(Direction::Long, 2010.0, 10.0, Some(2000.0), entry(2));
        t2.close(2002.0, exit(2)); // -80
        let open = Trade::open(Direction::Short, 2050.0, 10.0, Some(2060.0), entry(3));

        JournalService::new(InMemoryProvider::new(
            Account::new(10_000.0),
            RiskSettings::default(),
            vec![t1, t2, open],
        ))
    }

    #[test]
    fn position_size_uses_default_risk_percent() {
        let service = fixture();
        // default_risk_percent = 1 → dollar risk 100, distance 20 → 5 units
        let r = service
            .position_size(None, 2000.0, 1980.0, Direction::Long)
            .unwrap();
        assert_eq!(r.risk_percent, 1.0);
        assert_eq!(r.position_size, 5.0);
    }

    #[test]
    fn exposure_covers_open_trades_only() {
        let service = fixture();
        let exposure = service.risk_exposure().unwrap();
        assert_eq!(exposure.open_positions, 1);
        assert_eq!(exposure.total_risk_amount, 100.0);
    }

    #[test]
    fn limit_check_threads_settings_and_exposure() {
        let service = fixture();
        let candidate = CandidateTrade {
            direction: Direction::Long,
            entry_price: 2000.0,
            stop_loss: Some(1970.0),
            position_size: 10.0, // 300 risk = 3% > max 2%
        };
        let check = service.check_limits(&candidate).unwrap();
        assert!(!check.within_limits);
        assert_eq!(check.trade_risk_percent, Some(3.0));
    }

    #[test]
    fn dashboard_aggregates_closed_history() {
        let service = fixture();
        let dash = service.dashboard().unwrap();
        assert_eq!(dash.metrics.total_trades, 2);
        assert_eq!(dash.strategy.total_trades, 2);
        assert_eq!(dash.equity_curve.len(), 2);
        assert_eq!(dash.streaks.current_streak, -1);
        assert!((dash.metrics.total_profit_loss - 120.0).abs() < 1e-10);
    }

    #[test]
    fn performance_and_factors_delegate() {
        let service = fixture();
        let perf = service.performance(Interval::Monthly).unwrap();
        assert_eq!(perf.len(), 1);
        assert_eq!(perf[0].trade_count, 2);

        let by_direction = service.win_loss_by_factor("direction").unwrap();
        assert_eq!(by_direction.len(), 1);
        assert!(matches!(
            service.win_loss_by_factor("bogus"),
            Err(ServiceError::Analytics(AnalyticsError::InvalidFactor(_)))
        ));
    }
}
