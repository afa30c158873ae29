//! Domain types: trades, accounts, risk settings.

pub mod account;
pub mod risk_settings;
pub mod trade;

pub use account::Account;
pub use risk_settings::RiskSettings;
pub use trade::{Direction, PostAnalysis, PreAnalysis, Trade, TradeStatus};
