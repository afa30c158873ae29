//! Risk engine — position sizing bound to account state, open-risk exposure
//! aggregation, and limit checks for prospective trades.

pub mod exposure;
pub mod limits;
pub mod sizing;

pub use exposure::{current_risk_exposure, PositionRisk, RiskExposure};
pub use limits::{check_risk_limits, CandidateTrade, RiskLimitCheck};
pub use sizing::{calculate_position_size, PositionSizeResult};

use crate::domain::Direction;
use thiserror::Error;

/// Malformed or out-of-domain risk parameters. Never recovered internally;
/// the caller must correct the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("account balance must be positive, got {0}")]
    NonPositiveBalance(f64),
    #[error("risk percent must be in (0, 100], got {0}")]
    RiskPercentOutOfRange(f64),
    #[error("entry price must be positive, got {0}")]
    NonPositiveEntry(f64),
    #[error("stop loss {stop} is on the wrong side of entry {entry} for a {direction} trade")]
    StopOnWrongSide {
        entry: f64,
        stop: f64,
        direction: Direction,
    },
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}
