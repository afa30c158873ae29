//! Trade data provider trait.
//!
//! The provider abstracts over wherever trades and account state live (SQL
//! rows, HTTP fixtures, in-memory test data) so the analytics and risk
//! engines stay free of persistence concerns.

use thiserror::Error;

use crate::domain::{Account, RiskSettings, Trade, TradeStatus};

/// Errors surfaced by a data provider. Unknown-entity conditions belong
/// here, at the persistence edge — the engines assume already-resolved
/// entities.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("account not found")]
    AccountNotFound,
    #[error("provider error: {0}")]
    Other(String),
}

/// Supplies trade history and account state to the engines.
pub trait TradeProvider {
    fn closed_trades(&self) -> Result<Vec<Trade>, ProviderError>;
    fn open_trades(&self) -> Result<Vec<Trade>, ProviderError>;
    fn account(&self) -> Result<Account, ProviderError>;
    fn risk_settings(&self) -> Result<RiskSettings, ProviderError>;
}

/// In-memory provider for tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    pub account: Option<Account>,
    pub settings: RiskSettings,
    pub trades: Vec<Trade>,
}

impl InMemoryProvider {
    pub fn new(account: Account, settings: RiskSettings, trades: Vec<Trade>) -> Self {
        Self {
            account: Some(account),
            settings,
            trades,
        }
    }
}

impl TradeProvider for InMemoryProvider {
    fn closed_trades(&self) -> Result<Vec<Trade>, ProviderError> {
        Ok(self
            .trades
            .iter()
            .filter(|t| t.status == TradeStatus::Closed)
            .cloned()
            .collect())
    }

    fn open_trades(&self) -> Result<Vec<Trade>, ProviderError> {
        Ok(self
            .trades
            .iter()
            .filter(|t| t.status == TradeStatus::Open)
            .cloned()
            .collect())
    }

    fn account(&self) -> Result<Account, ProviderError> {
        Ok(self
            .account
            .clone()
            .ok_or(ProviderError::AccountNotFound)?)
    }

    fn risk_settings(&self) -> Result<RiskSettings, ProviderError> {
        Ok(self.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use chrono::{TimeZone, Utc};

    #[test]
    fn partitions_trades_by_status() {
        let entry = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let open = Trade::open(Direction::Long, 2000.0, 1.0, None, entry);
        let mut closed = open.clone();
        closed.close(2010.0, Utc.with_ymd_and_hms(2024, 1, 1, 16, 0, 0).unwrap());

        let provider = InMemoryProvider::new(
            Account::new(10_000.0),
            RiskSettings::default(),
            vec![open, closed],
        );
        assert_eq!(provider.open_trades().unwrap().len(), 1);
        assert_eq!(provider.closed_trades().unwrap().len(), 1);
    }

    #[test]
    fn missing_account_is_a_provider_error() {
        let provider = InMemoryProvider::default();
        assert!(matches!(
            provider.account(),
            Err(ProviderError::AccountNotFound)
        ));
    }
}
