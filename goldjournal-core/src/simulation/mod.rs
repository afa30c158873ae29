//! Monte Carlo trade simulator.
//!
//! Runs many independent synthetic trade sequences from a fixed
//! win-rate/average-win/average-loss model and derives distributional
//! statistics over the final balances. Trials are embarrassingly parallel
//! and run on the rayon pool; a seeded config is reproducible because each
//! trial derives its own order-independent RNG.

pub mod rng;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::max_drawdown;
use rng::TrialRng;

// ─── Configuration ───────────────────────────────────────────────────

/// Parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub initial_balance: f64,
    /// Probability of a winning trade, in [0, 1].
    pub win_rate: f64,
    /// Currency gained on a win.
    pub average_win: f64,
    /// Currency lost on a loss (magnitude).
    pub average_loss: f64,
    pub number_of_trades: usize,
    pub number_of_simulations: usize,
    /// Keep per-trial equity curves in the summary. Off by default: the
    /// curves are large and the boundary only needs aggregate statistics.
    pub include_trial_detail: bool,
    /// Master seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_balance: 10_000.0,
            win_rate: 0.5,
            average_win: 200.0,
            average_loss: 100.0,
            number_of_trades: 100,
            number_of_simulations: 1000,
            include_trial_detail: false,
            seed: None,
        }
    }
}

/// Malformed simulation parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("win_rate must be within [0, 1], got {0}")]
    InvalidWinRate(f64),
    #[error("initial_balance must be positive, got {0}")]
    NonPositiveBalance(f64),
    #[error("{name} must not be negative, got {value}")]
    NegativeAmount { name: &'static str, value: f64 },
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [
            ("initial_balance", self.initial_balance),
            ("win_rate", self.win_rate),
            ("average_win", self.average_win),
            ("average_loss", self.average_loss),
        ] {
            if !value.is_finite() {
                return Err(SimulationError::NotFinite(name));
            }
        }
        if self.initial_balance <= 0.0 {
            return Err(SimulationError::NonPositiveBalance(self.initial_balance));
        }
        if !(0.0..=1.0).contains(&self.win_rate) {
            return Err(SimulationError::InvalidWinRate(self.win_rate));
        }
        if self.average_win < 0.0 {
            return Err(SimulationError::NegativeAmount {
                name: "average_win",
                value: self.average_win,
            });
        }
        if self.average_loss < 0.0 {
            return Err(SimulationError::NegativeAmount {
                name: "average_loss",
                value: self.average_loss,
            });
        }
        if self.number_of_trades == 0 {
            return Err(SimulationError::ZeroCount("number_of_trades"));
        }
        if self.number_of_simulations == 0 {
            return Err(SimulationError::ZeroCount("number_of_simulations"));
        }
        Ok(())
    }
}

// ─── Result types ────────────────────────────────────────────────────

/// Outcome of one trial. `equity_curve` starts with the initial balance and
/// has one further point per simulated trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub final_balance: f64,
    pub max_drawdown: f64,
    pub return_pct: f64,
    pub equity_curve: Vec<f64>,
}

/// Distributional statistics over all trial outcomes. Percentiles are final
/// balances, not returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Fraction of trials ending below the initial balance.
    pub failure_rate: f64,
    pub average_return: f64,
    pub median_return: f64,
    pub max_return: f64,
    pub min_return: f64,
    pub average_max_drawdown: f64,
    pub percentile_5: f64,
    pub percentile_25: f64,
    pub percentile_50: f64,
    pub percentile_75: f64,
    pub percentile_95: f64,
    /// Per-trial detail, present only when requested in the config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<Vec<Trial>>,
}

// ─── Simulation ──────────────────────────────────────────────────────

/// Run the full Monte Carlo simulation described by `config`.
pub fn run(config: &SimulationConfig) -> Result<SimulationSummary, SimulationError> {
    config.validate()?;

    let trial_rng = config.seed.map(TrialRng::new);

    let mut trials: Vec<Trial> = (0..config.number_of_simulations)
        .into_par_iter()
        .map(|i| {
            let rng = match trial_rng {
                Some(tr) => tr.rng_for(i as u64),
                None => StdRng::from_entropy(),
            };
            run_trial(config, rng)
        })
        .collect();

    Ok(summarize(config, &mut trials))
}

fn run_trial(config: &SimulationConfig, mut rng: StdRng) -> Trial {
    let mut balance = config.initial_balance;
    let mut equity_curve = Vec::with_capacity(config.number_of_trades + 1);
    equity_curve.push(balance);

    for _ in 0..config.number_of_trades {
        let is_win = rng.gen::<f64>() < config.win_rate;
        if is_win {
            balance += config.average_win;
        } else {
            balance -= config.average_loss;
        }
        equity_curve.push(balance);
    }

    Trial {
        final_balance: balance,
        max_drawdown: max_drawdown(&equity_curve),
        return_pct: (balance - config.initial_balance) / config.initial_balance * 100.0,
        equity_curve,
    }
}

fn summarize(config: &SimulationConfig, trials: &mut Vec<Trial>) -> SimulationSummary {
    let n = trials.len();
    let initial = config.initial_balance;

    let mut final_balances: Vec<f64> = trials.iter().map(|t| t.final_balance).collect();
    final_balances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Index-based percentile: element at floor(n * p) of the ascending
    // balances, clamped to the last element.
    let percentile = |p: f64| final_balances[((n as f64 * p).floor() as usize).min(n - 1)];

    let failures = final_balances.iter().filter(|&&b| b < initial).count();
    let mean_balance = final_balances.iter().sum::<f64>() / n as f64;
    let return_pct = |balance: f64| (balance - initial) / initial * 100.0;

    let average_max_drawdown = trials.iter().map(|t| t.max_drawdown).sum::<f64>() / n as f64;

    let trials_out = if config.include_trial_detail {
        Some(std::mem::take(trials))
    } else {
        None
    };

    SimulationSummary {
        failure_rate: failures as f64 / n as f64,
        average_return: return_pct(mean_balance),
        median_return: return_pct(percentile(0.5)),
        max_return: return_pct(final_balances[n - 1]),
        min_return: return_pct(final_balances[0]),
        average_max_drawdown,
        percentile_5: percentile(0.05),
        percentile_25: percentile(0.25),
        percentile_50: percentile(0.5),
        percentile_75: percentile(0.75),
        percentile_95: percentile(0.95),
        trials: trials_out,
    }
}
