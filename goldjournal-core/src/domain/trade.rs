//! Trade — a single journaled gold position, open or closed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Side of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// Pre-trade analysis annotations. All fields are free-form journal entries;
/// factor grouping treats a missing value as its own "unknown" bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreAnalysis {
    pub daily_trend: Option<String>,
    pub htf_setup: Option<String>,
    pub clean_range: Option<String>,
    pub volume_time: Option<String>,
}

/// Post-trade analysis annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAnalysis {
    pub emotional_state: Option<String>,
}

/// A journaled trade record.
///
/// Created open (no exit data), closed exactly once, immutable afterwards
/// except for analysis annotations. `profit_loss` is defined iff the trade
/// is closed with an exit price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub position_size: f64,
    pub profit_loss: Option<f64>,
    pub status: TradeStatus,
    pub entry_date: DateTime<Utc>,
    pub exit_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pre_analysis: PreAnalysis,
    #[serde(default)]
    pub post_analysis: PostAnalysis,
}

impl Trade {
    /// Open a new trade with no exit data.
    pub fn open(
        direction: Direction,
        entry_price: f64,
        position_size: f64,
        stop_loss: Option<f64>,
        entry_date: DateTime<Utc>,
    ) -> Self {
        Self {
            direction,
            entry_price,
            exit_price: None,
            stop_loss,
            position_size,
            profit_loss: None,
            status: TradeStatus::Open,
            entry_date,
            exit_date: None,
            pre_analysis: PreAnalysis::default(),
            post_analysis: PostAnalysis::default(),
        }
    }

    /// Close the trade at `exit_price`, deriving the realized profit/loss.
    ///
    /// Long: `(exit - entry) * size`. Short: inverted.
    pub fn close(&mut self, exit_price: f64, exit_date: DateTime<Utc>) {
        let diff = match self.direction {
            Direction::Long => exit_price - self.entry_price,
            Direction::Short => self.entry_price - exit_price,
        };
        self.exit_price = Some(exit_price);
        self.exit_date = Some(exit_date);
        self.profit_loss = Some(diff * self.position_size);
        self.status = TradeStatus::Closed;
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Realized profit/loss; 0.0 while the trade is still open.
    pub fn pnl(&self) -> f64 {
        self.profit_loss.unwrap_or(0.0)
    }

    pub fn is_winner(&self) -> bool {
        self.pnl() > 0.0
    }

    /// Currency amount at risk between entry and stop, if a stop is set.
    pub fn risk_amount(&self) -> Option<f64> {
        self.stop_loss
            .map(|stop| (self.entry_price - stop).abs() * self.position_size)
    }
}
