//! End-to-end journal flow integration test.
//!
//! Drives a small but realistic month of gold trades through every engine:
//! sizing, exposure, limit checks, analytics buckets, equity curve, factor
//! breakdowns, risk metrics, streaks, and the strategy summary. Golden values
//! are computed by hand from the fixture history.

use chrono::{DateTime, TimeZone, Utc};

use goldjournal_core::analytics::{
    consecutive_stats, equity_curve, performance_over_time, risk_metrics, win_loss_by_factor,
    Interval,
};
use goldjournal_core::domain::{Account, Direction, RiskSettings, Trade};
use goldjournal_core::provider::InMemoryProvider;
use goldjournal_core::risk::{
    calculate_position_size, check_risk_limits, current_risk_exposure, CandidateTrade,
};
use goldjournal_core::service::JournalService;
use goldjournal_core::strategy::summarize;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

fn closed(
    direction: Direction,
    entry: f64,
    exit: f64,
    size: f64,
    stop: Option<f64>,
    day: u32,
    trend: &str,
) -> Trade {
    let mut t = Trade::open(direction, entry, size, stop, at(day, 9));
    t.pre_analysis.daily_trend = Some(trend.to_string());
    t.close(exit, at(day, 15));
    t
}

/// Five closed trades and one open short.
///
/// PnL sequence by exit date: +200, -80, +150, -50, +100 (net +320).
fn history() -> Vec<Trade> {
    vec![
        closed(Direction::Long, 2000.0, 2020.0, 10.0, Some(1990.0), 4, "bullish"),
        closed(Direction::Long, 2015.0, 2007.0, 10.0, Some(2005.0), 5, "bullish"),
        closed(Direction::Short, 2040.0, 2025.0, 10.0, Some(2050.0), 11, "bearish"),
        closed(Direction::Long, 2030.0, 2025.0, 10.0, Some(2020.0), 12, "bullish"),
        closed(Direction::Short, 2050.0, 2040.0, 10.0, Some(2060.0), 18, "bearish"),
        Trade::open(Direction::Short, 2060.0, 5.0, Some(2070.0), at(25, 9)),
    ]
}

#[test]
fn sizing_matches_hand_computed_golden() {
    // 10k account, 2% risk, entry 2000, stop 1980 (long).
    let r = calculate_position_size(10_000.0, 2.0, 2000.0, 1980.0, Direction::Long).unwrap();
    assert_eq!(r.dollar_risk, 200.0);
    assert_eq!(r.price_difference, 20.0);
    assert_eq!(r.position_size, 10.0);
    assert_eq!(r.position_value, 20_000.0);
    assert_eq!(r.leverage_used, 2.0);
    assert_eq!(r.risk_reward_1r, 2000.0);
    assert_eq!(r.risk_reward_2r, 2040.0);
    assert_eq!(r.risk_reward_3r, 2060.0);
}

#[test]
fn exposure_and_limits_over_live_history() {
    let trades = history();
    let open: Vec<Trade> = trades.iter().filter(|t| !t.is_closed()).cloned().collect();
    let exposure = current_risk_exposure(&open, 10_000.0);

    // One open short risking |2060-2070| * 5 = 50 = 0.5%.
    assert_eq!(exposure.open_positions, 1);
    assert_eq!(exposure.total_risk_amount, 50.0);
    assert!((exposure.total_risk_percent - 0.5).abs() < 1e-10);

    // A modest candidate passes every limit.
    let settings = RiskSettings::default();
    let ok = check_risk_limits(
        &CandidateTrade {
            direction: Direction::Long,
            entry_price: 2000.0,
            stop_loss: Some(1990.0),
            position_size: 10.0, // 100 risk = 1%
        },
        &settings,
        &exposure,
        10_000.0,
    );
    assert!(ok.within_limits);
    assert!(ok.warnings.is_empty());

    // An oversized candidate trips the per-trade cap but still reports
    // the computed figures.
    let too_big = check_risk_limits(
        &CandidateTrade {
            direction: Direction::Long,
            entry_price: 2000.0,
            stop_loss: Some(1950.0),
            position_size: 10.0, // 500 risk = 5%
        },
        &settings,
        &exposure,
        10_000.0,
    );
    // 5% trips the per-trade cap, and 0.5% + 5% trips the 5% daily cap.
    assert!(!too_big.within_limits);
    assert_eq!(too_big.trade_risk_percent, Some(5.0));
    assert_eq!(too_big.total_risk_percent, Some(5.5));
    assert_eq!(too_big.warnings.len(), 2);
    assert!(too_big.warnings[0].contains("exceeds maximum position risk"));
}

#[test]
fn equity_curve_and_buckets_agree_on_totals() {
    let trades = history();
    let curve = equity_curve(&trades);
    assert_eq!(curve.len(), 5);
    let final_balance = curve.last().map(|p| p.running_balance);
    assert_eq!(final_balance, Some(320.0));

    // Monthly bucketing: everything lands in 2024-03.
    let monthly = performance_over_time(&trades, Interval::Monthly);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].time_period, "2024-03");
    assert_eq!(monthly[0].trade_count, 5);
    assert!((monthly[0].period_pnl - 320.0).abs() < 1e-10);
    assert_eq!(monthly[0].winning_trades, 3);
    assert_eq!(monthly[0].losing_trades, 2);

    // Weekly bucketing splits it into ISO weeks 10, 11, 12.
    let weekly = performance_over_time(&trades, Interval::Weekly);
    let periods: Vec<&str> = weekly.iter().map(|p| p.time_period.as_str()).collect();
    assert_eq!(periods, vec!["2024-W10", "2024-W11", "2024-W12"]);
    let total: f64 = weekly.iter().map(|p| p.period_pnl).sum();
    assert!((total - 320.0).abs() < 1e-10);
}

#[test]
fn factor_breakdown_matches_annotations() {
    let trades = history();
    let by_trend = win_loss_by_factor(&trades, "daily_trend").unwrap();
    // bullish: +200, -80, -50 → 1W/2L; bearish: +150, +100 → 2W/0L.
    let bearish = by_trend.iter().find(|g| g.factor == "bearish").unwrap();
    assert_eq!(bearish.winning_trades, 2);
    assert_eq!(bearish.losing_trades, 0);
    assert_eq!(bearish.win_rate, 100.0);

    let bullish = by_trend.iter().find(|g| g.factor == "bullish").unwrap();
    assert_eq!(bullish.winning_trades, 1);
    assert_eq!(bullish.losing_trades, 2);

    // Sorted by average PnL descending, so bearish leads.
    assert_eq!(by_trend[0].factor, "bearish");
}

#[test]
fn metrics_streaks_and_strategy_summary() {
    let trades = history();
    let m = risk_metrics(&trades);
    assert_eq!(m.total_trades, 5);
    assert_eq!(m.winning_trades, 3);
    assert!((m.win_rate - 60.0).abs() < 1e-10);
    assert!((m.total_profit_loss - 320.0).abs() < 1e-10);
    // Gross profit 450, gross loss 130.
    assert!((m.profit_factor - 450.0 / 130.0).abs() < 1e-10);
    // Worst peak-to-trough on the running balance: 200 → 120 = 80 currency.
    assert!((m.max_drawdown - 80.0).abs() < 1e-10);

    let s = consecutive_stats(&trades);
    // Sequence W L W L W.
    assert_eq!(s.max_consecutive_wins, 1);
    assert_eq!(s.max_consecutive_losses, 1);
    assert_eq!(s.current_streak, 1);
    assert_eq!(s.is_current_streak_winning, Some(true));

    let strat = summarize(&trades);
    assert_eq!(strat.total_trades, 5);
    assert!((strat.average_win - 150.0).abs() < 1e-10);
    assert!((strat.average_loss - 65.0).abs() < 1e-10);
    assert_eq!(strat.largest_win, 200.0);
    assert_eq!(strat.largest_loss, -80.0);
}

#[test]
fn service_facade_over_the_same_history() {
    let service = JournalService::new(InMemoryProvider::new(
        Account::new(10_000.0),
        RiskSettings::default(),
        history(),
    ));

    let dash = service.dashboard().unwrap();
    assert_eq!(dash.metrics.total_trades, 5);
    assert_eq!(dash.equity_curve.len(), 5);
    assert_eq!(dash.streaks.current_streak, 1);
    assert!((dash.strategy.net_profit - 320.0).abs() < 1e-10);

    let exposure = service.risk_exposure().unwrap();
    assert_eq!(exposure.open_positions, 1);
}
