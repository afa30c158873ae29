//! GoldJournal Core — the quantitative engine behind the gold-trading
//! journal.
//!
//! This crate contains everything with algorithmic content:
//! - Trading math primitives (sizing, Kelly, drawdown, expectancy)
//! - Risk engine (account-bound position sizing, exposure, limit checks)
//! - Performance analytics (time buckets, equity curve, factor breakdowns,
//!   consolidated risk metrics, streaks)
//! - Monte Carlo trade simulator
//! - Strategy metrics summarizer and what-if scenario analytics
//!
//! Every engine is a pure, reentrant function over in-memory inputs; the
//! provider trait is the only seam to the outside world.

pub mod analytics;
pub mod domain;
pub mod math;
pub mod provider;
pub mod risk;
pub mod scenario;
pub mod service;
pub mod simulation;
pub mod strategy;
