//! Account — balance state the risk engine sizes against.

use serde::{Deserialize, Serialize};

/// A trading account. `current_balance` is authoritative for risk sizing;
/// applying a closed trade's profit/loss to it is the persistence layer's
/// job, not the core's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub current_balance: f64,
}

impl Account {
    pub fn new(current_balance: f64) -> Self {
        Self { current_balance }
    }
}
