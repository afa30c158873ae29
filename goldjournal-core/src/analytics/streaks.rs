//! Consecutive win/loss streak tracking.

use serde::{Deserialize, Serialize};

use super::closed_by_exit_date;
use crate::domain::Trade;

/// Streak statistics over a closed-trade history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsecutiveStats {
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
    /// Terminal ongoing streak: positive for wins, negative for losses.
    pub current_streak: i64,
    /// `None` when there are no closed trades.
    pub is_current_streak_winning: Option<bool>,
}

/// Single pass over closed trades in exit-date order, tracking win and loss
/// streaks. Each outcome flip resets the opposite counter.
pub fn consecutive_stats(trades: &[Trade]) -> ConsecutiveStats {
    let closed = closed_by_exit_date(trades);
    if closed.is_empty() {
        return ConsecutiveStats::default();
    }

    let mut max_wins = 0_usize;
    let mut max_losses = 0_usize;
    let mut current_wins = 0_usize;
    let mut current_losses = 0_usize;

    for trade in &closed {
        if trade.is_winner() {
            current_losses = 0;
            current_wins += 1;
            max_wins = max_wins.max(current_wins);
        } else {
            current_wins = 0;
            current_losses += 1;
            max_losses = max_losses.max(current_losses);
        }
    }

    let last_was_win = closed.last().map(|t| t.is_winner()).unwrap_or(false);
    let current_streak = if last_was_win {
        current_wins as i64
    } else {
        -(current_losses as i64)
    };

    ConsecutiveStats {
        max_consecutive_wins: max_wins,
        max_consecutive_losses: max_losses,
        current_streak,
        is_current_streak_winning: Some(last_was_win),
    }
}
