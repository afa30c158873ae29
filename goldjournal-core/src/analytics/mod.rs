//! Performance analytics engine — in-memory aggregation over a materialized
//! list of closed trades.
//!
//! The persistence layer's only job is to supply that flat list; every
//! aggregate here is a pure function over it.

pub mod equity;
pub mod factors;
pub mod performance;
pub mod risk_metrics;
pub mod streaks;

pub use equity::{equity_curve, EquityPoint};
pub use factors::{win_loss_by_factor, Factor, FactorBreakdown};
pub use performance::{performance_over_time, Interval, PeriodPerformance};
pub use risk_metrics::{risk_metrics, RiskMetrics};
pub use streaks::{consecutive_stats, ConsecutiveStats};

use thiserror::Error;

/// Analytics input errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("invalid factor: {0}")]
    InvalidFactor(String),
    #[error("invalid interval: {0}")]
    InvalidInterval(String),
}

/// Closed trades sorted by exit date ascending (undated trades are
/// filtered out with the open ones). Shared by every chronological pass.
pub(crate) fn closed_by_exit_date(trades: &[crate::domain::Trade]) -> Vec<&crate::domain::Trade> {
    let mut closed: Vec<&crate::domain::Trade> = trades
        .iter()
        .filter(|t| t.is_closed() && t.exit_date.is_some())
        .collect();
    closed.sort_by_key(|t| t.exit_date);
    closed
}
