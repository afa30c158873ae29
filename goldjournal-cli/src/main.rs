//! GoldJournal CLI — sizing, scenario, simulation, and analysis commands.
//!
//! Commands:
//! - `size` — position size for an account balance, risk percent, and stop
//! - `scenario` — what-if analytics for a planned trade (RR, EV, Kelly ladder)
//! - `simulate` — Monte Carlo trade simulation from flags or a TOML config
//! - `analyze` — risk metrics, streaks, and breakdowns over a trade JSON file

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use goldjournal_core::analytics::{
    consecutive_stats, equity_curve, performance_over_time, risk_metrics, win_loss_by_factor,
    Interval,
};
use goldjournal_core::domain::{Direction, Trade};
use goldjournal_core::risk::calculate_position_size;
use goldjournal_core::scenario::{analyze_scenario, TradeScenario};
use goldjournal_core::simulation::{self, SimulationConfig};
use goldjournal_core::strategy::summarize;

#[derive(Parser)]
#[command(
    name = "goldjournal",
    about = "GoldJournal CLI — gold trading journal analytics engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute position size for an account balance, risk percent, and stop.
    Size {
        /// Account balance in currency units.
        #[arg(long)]
        balance: f64,

        /// Risk percent of the balance, (0, 100].
        #[arg(long, default_value_t = 1.0)]
        risk: f64,

        /// Entry price.
        #[arg(long)]
        entry: f64,

        /// Stop loss price.
        #[arg(long)]
        stop: f64,

        /// Trade direction: long or short.
        #[arg(long, default_value = "long")]
        direction: String,
    },
    /// What-if analytics for a planned trade.
    Scenario {
        /// Entry price.
        #[arg(long)]
        entry: f64,

        /// Stop loss price.
        #[arg(long)]
        stop: f64,

        /// Take profit price.
        #[arg(long)]
        target: f64,

        /// Position size in units.
        #[arg(long)]
        size: f64,

        /// Assumed win probability in [0, 1].
        #[arg(long, default_value_t = 0.5)]
        win_prob: f64,

        /// Account balance; enables Kelly sizing and risk percent.
        #[arg(long)]
        balance: Option<f64>,
    },
    /// Run a Monte Carlo trade simulation.
    Simulate {
        /// Path to a TOML config file (exclusive with the parameter flags).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Starting balance.
        #[arg(long)]
        balance: Option<f64>,

        /// Win rate in [0, 1].
        #[arg(long)]
        win_rate: Option<f64>,

        /// Average win in currency units.
        #[arg(long)]
        avg_win: Option<f64>,

        /// Average loss in currency units (magnitude).
        #[arg(long)]
        avg_loss: Option<f64>,

        /// Trades per trial.
        #[arg(long)]
        trades: Option<usize>,

        /// Number of trials.
        #[arg(long)]
        simulations: Option<usize>,

        /// Master seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full summary as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Analyze a trade history from a JSON file.
    Analyze {
        /// Path to a JSON array of trades.
        file: PathBuf,

        /// Also print a performance table: daily, weekly, monthly, yearly.
        #[arg(long)]
        interval: Option<String>,

        /// Also print a win/loss breakdown by factor (e.g. direction,
        /// day_of_week, daily_trend, emotional_state).
        #[arg(long)]
        factor: Option<String>,

        /// Print everything as JSON instead of tables.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Size {
            balance,
            risk,
            entry,
            stop,
            direction,
        } => run_size(balance, risk, entry, stop, &direction),
        Commands::Scenario {
            entry,
            stop,
            target,
            size,
            win_prob,
            balance,
        } => run_scenario(entry, stop, target, size, win_prob, balance),
        Commands::Simulate {
            config,
            balance,
            win_rate,
            avg_win,
            avg_loss,
            trades,
            simulations,
            seed,
            json,
        } => run_simulate(
            config,
            balance,
            win_rate,
            avg_win,
            avg_loss,
            trades,
            simulations,
            seed,
            json,
        ),
        Commands::Analyze {
            file,
            interval,
            factor,
            json,
        } => run_analyze(&file, interval.as_deref(), factor.as_deref(), json),
    }
}

fn parse_direction(s: &str) -> Result<Direction> {
    match s {
        "long" => Ok(Direction::Long),
        "short" => Ok(Direction::Short),
        other => bail!("unknown direction '{other}'. Valid: long, short"),
    }
}

fn run_size(balance: f64, risk: f64, entry: f64, stop: f64, direction: &str) -> Result<()> {
    let direction = parse_direction(direction)?;
    let result = calculate_position_size(balance, risk, entry, stop, direction)?.rounded();

    println!();
    println!("=== Position Size ===");
    println!("Account:        {:.2}", result.account_value);
    println!("Risk:           {}% ({:.2})", result.risk_percent, result.dollar_risk);
    println!("Stop distance:  {:.2}", result.price_difference);
    println!("Position size:  {:.2} units", result.position_size);
    println!("Position value: {:.2}", result.position_value);
    println!("Leverage:       {:.2}x", result.leverage_used);
    println!();
    println!("--- R-multiple targets ---");
    println!("1R: {:.2}", result.risk_reward_1r);
    println!("2R: {:.2}", result.risk_reward_2r);
    println!("3R: {:.2}", result.risk_reward_3r);
    println!();
    Ok(())
}

fn run_scenario(
    entry: f64,
    stop: f64,
    target: f64,
    size: f64,
    win_prob: f64,
    balance: Option<f64>,
) -> Result<()> {
    let analytics = analyze_scenario(&TradeScenario {
        entry_price: entry,
        stop_loss: stop,
        take_profit: target,
        position_size: size,
        win_probability: win_prob,
        account_balance: balance,
    })?
    .rounded();

    println!();
    println!("=== Trade Scenario ===");
    println!("Risk amount:      {:.2}", analytics.risk_amount);
    println!("Potential profit: {:.2}", analytics.potential_profit);
    println!("Risk/reward:      {:.2}", analytics.risk_reward_ratio);
    println!("Expected value:   {:.2}", analytics.expected_value);
    if let Some(pct) = analytics.risk_percent {
        println!("Risk of balance:  {pct:.2}%");
    }
    println!();
    println!("--- Kelly sizing ---");
    println!("Full Kelly fraction: {:.4}", analytics.kelly_fraction);
    if let Some(kelly) = analytics.kelly_position_size {
        println!("Full Kelly size:     {kelly:.2} units");
    }
    if let Some(rec) = analytics.recommended_position_size {
        println!("Recommended (half):  {rec:.2} units");
    }
    if let Some(cons) = analytics.conservative_position_size {
        println!("Conservative (1/4):  {cons:.2} units");
    }
    if let Some(agg) = analytics.aggressive_position_size {
        println!("Aggressive (3/4):    {agg:.2} units");
    }
    println!();
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_simulate(
    config_path: Option<PathBuf>,
    balance: Option<f64>,
    win_rate: Option<f64>,
    avg_win: Option<f64>,
    avg_loss: Option<f64>,
    trades: Option<usize>,
    simulations: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let flags_given = balance.is_some()
        || win_rate.is_some()
        || avg_win.is_some()
        || avg_loss.is_some()
        || trades.is_some()
        || simulations.is_some();
    if config_path.is_some() && flags_given {
        bail!("--config and parameter flags are mutually exclusive");
    }

    let mut config = if let Some(path) = config_path {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str::<SimulationConfig>(&content)
            .with_context(|| format!("parsing config {}", path.display()))?
    } else {
        let defaults = SimulationConfig::default();
        SimulationConfig {
            initial_balance: balance.unwrap_or(defaults.initial_balance),
            win_rate: win_rate.unwrap_or(defaults.win_rate),
            average_win: avg_win.unwrap_or(defaults.average_win),
            average_loss: avg_loss.unwrap_or(defaults.average_loss),
            number_of_trades: trades.unwrap_or(defaults.number_of_trades),
            number_of_simulations: simulations.unwrap_or(defaults.number_of_simulations),
            ..defaults
        }
    };
    if seed.is_some() {
        config.seed = seed;
    }

    let summary = simulation::run(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("=== Monte Carlo Simulation ===");
    println!(
        "Trials:          {} x {} trades",
        config.number_of_simulations, config.number_of_trades
    );
    println!(
        "Model:           win rate {:.0}%, +{:.2} / -{:.2}",
        config.win_rate * 100.0,
        config.average_win,
        config.average_loss
    );
    println!("Failure rate:    {:.1}%", summary.failure_rate * 100.0);
    println!("Average return:  {:.2}%", summary.average_return);
    println!("Median return:   {:.2}%", summary.median_return);
    println!(
        "Return range:    {:.2}% to {:.2}%",
        summary.min_return, summary.max_return
    );
    println!("Avg max drawdown:{:.2}%", summary.average_max_drawdown);
    println!();
    println!("--- Final balance percentiles ---");
    println!(" 5th: {:.2}", summary.percentile_5);
    println!("25th: {:.2}", summary.percentile_25);
    println!("50th: {:.2}", summary.percentile_50);
    println!("75th: {:.2}", summary.percentile_75);
    println!("95th: {:.2}", summary.percentile_95);
    println!();
    Ok(())
}

fn run_analyze(
    file: &std::path::Path,
    interval: Option<&str>,
    factor: Option<&str>,
    json: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading trades {}", file.display()))?;
    let trades: Vec<Trade> = serde_json::from_str(&content)
        .with_context(|| format!("parsing trades {}", file.display()))?;

    let metrics = risk_metrics(&trades).rounded();
    let streaks = consecutive_stats(&trades);
    let strategy = summarize(&trades);
    let curve = equity_curve(&trades);

    let performance = interval
        .map(|s| Interval::from_str(s).map(|i| performance_over_time(&trades, i)))
        .transpose()?;
    let breakdown = factor.map(|f| win_loss_by_factor(&trades, f)).transpose()?;

    if json {
        let out = serde_json::json!({
            "metrics": metrics,
            "streaks": streaks,
            "strategy": strategy,
            "equity_curve": curve,
            "performance": performance,
            "factor_breakdown": breakdown,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("=== Journal Analysis ===");
    println!("Trades:          {} closed", metrics.total_trades);
    println!(
        "Record:          {}W / {}L ({:.1}% win rate)",
        metrics.winning_trades, metrics.losing_trades, metrics.win_rate
    );
    println!("Net P/L:         {:.2}", metrics.total_profit_loss);
    println!("Profit factor:   {:.2}", metrics.profit_factor);
    println!("Expectancy:      {:.2}", metrics.expectancy);
    println!("Sharpe:          {:.2}", metrics.sharpe_ratio);
    println!(
        "Max drawdown:    {:.2} (current {:.2})",
        metrics.max_drawdown, metrics.current_drawdown
    );
    println!(
        "Avg win / loss:  {:.2} / {:.2}",
        metrics.average_profit, metrics.average_loss
    );
    println!(
        "Streaks:         max {}W, max {}L, current {}",
        streaks.max_consecutive_wins, streaks.max_consecutive_losses, streaks.current_streak
    );
    println!(
        "Largest win/loss:{:.2} / {:.2}",
        strategy.largest_win, strategy.largest_loss
    );
    if let Some(point) = curve.last() {
        println!("Final equity:    {:.2}", point.running_balance);
    }

    if let Some(periods) = performance {
        println!();
        println!(
            "{:<12} {:>6} {:>10} {:>8} {:>8}",
            "Period", "Trades", "P/L", "Win %", "PF"
        );
        println!("{}", "-".repeat(48));
        for p in &periods {
            println!(
                "{:<12} {:>6} {:>10.2} {:>7.1}% {:>8.2}",
                p.time_period, p.trade_count, p.period_pnl, p.win_rate, p.profit_factor
            );
        }
    }

    if let Some(groups) = breakdown {
        println!();
        println!(
            "{:<16} {:>6} {:>6} {:>6} {:>10} {:>8}",
            "Factor", "Trades", "Wins", "Losses", "Avg P/L", "Win %"
        );
        println!("{}", "-".repeat(58));
        for g in &groups {
            println!(
                "{:<16} {:>6} {:>6} {:>6} {:>10.2} {:>7.1}%",
                g.factor, g.trade_count, g.winning_trades, g.losing_trades, g.avg_profit_loss,
                g.win_rate
            );
        }
    }

    println!();
    Ok(())
}
