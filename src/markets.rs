//! Market snapshots and trading-period math
//!
//! The bot trades 15-minute Up/Down contracts. The period countdown used to
//! be recomputed by every frontend variant; here it is computed once,
//! server-side, and shipped inside the markets payload.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::types::{DashboardStateData, MarketQuote, MarketsUpdate, TradeRecord, TradeSide, TradesResponse};

/// Half the quoted bid/ask spread
const HALF_SPREAD: f64 = 0.01;

/// Gap kept between an Up/Down pair's bids so they never sum to an arbitrage
const PAIR_MARGIN: f64 = 0.02;

/// End of the current trading period: the next boundary on the wall-clock
/// grid. A timestamp exactly on a boundary belongs to the period that starts
/// there, so it rolls to the next one.
pub fn period_end(now: DateTime<Utc>, period_minutes: u32) -> DateTime<Utc> {
    let period_secs = i64::from(period_minutes) * 60;
    let secs = now.timestamp();
    let end_secs = secs - secs.rem_euclid(period_secs) + period_secs;
    DateTime::from_timestamp(end_secs, 0).unwrap_or(now)
}

/// Time remaining until `end`, as `MM:SS`, clamped at `00:00`
pub fn time_remaining(now: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let diff_ms = (end - now).num_milliseconds();
    if diff_ms <= 0 {
        return "00:00".to_string();
    }
    let minutes = diff_ms / 60_000;
    let seconds = (diff_ms % 60_000) / 1000;
    format!("{minutes:02}:{seconds:02}")
}

/// Build the markets payload for `now`.
///
/// With `simulate_markets` on, each configured symbol yields an Up and a Down
/// contract with a deterministic wobble derived from the timestamp; otherwise
/// the envelope is served with an empty market list (the bot is the only
/// real quote source and it does not report quotes).
pub fn snapshot(config: &Config, now: DateTime<Utc>) -> MarketsUpdate {
    let end = period_end(now, config.period_minutes);
    let remaining = time_remaining(now, end);

    let mut markets = Vec::new();
    if config.simulate_markets {
        for (idx, symbol) in config.symbols.iter().enumerate() {
            let base = 0.35 + 0.03 * (idx % 5) as f64;
            let seed = now.timestamp_millis().max(0) as u64 / 5000 + idx as u64;
            let up_mid = (base + wobble(seed)).clamp(0.05, 0.95);

            markets.push(quote(&format!("{symbol} Up"), up_mid, up_mid - base, &remaining));

            let down_mid = (1.0 - up_mid - PAIR_MARGIN).clamp(0.05, 0.95);
            markets.push(quote(
                &format!("{symbol} Down"),
                down_mid,
                base - up_mid,
                &remaining,
            ));
        }
    }

    MarketsUpdate {
        timestamp: now.to_rfc3339(),
        period: format!("{}-minute", config.period_minutes),
        period_end: end.to_rfc3339(),
        markets,
    }
}

fn quote(symbol: &str, mid: f64, change: f64, remaining: &str) -> MarketQuote {
    MarketQuote {
        symbol: symbol.to_string(),
        bid: mid - HALF_SPREAD,
        ask: mid + HALF_SPREAD,
        change,
        time_remaining: remaining.to_string(),
    }
}

/// Deterministic wobble in [-0.05, 0.05] (splitmix-style integer mix)
fn wobble(seed: u64) -> f64 {
    let mut x = seed
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407);
    x ^= x >> 33;
    let unit = (x % 10_000) as f64 / 10_000.0;
    (unit - 0.5) * 0.1
}

/// Build the trade-history payload from state, falling back to the demo
/// fixture when the bot has reported nothing and simulation is on
pub fn build_trades_response(
    state: &DashboardStateData,
    config: &Config,
    now: DateTime<Utc>,
) -> TradesResponse {
    if state.trades.is_empty() && config.simulate_markets {
        let trades = demo_trades();
        let total = trades.len() as u64;
        return TradesResponse {
            trades,
            total,
            last_updated: now.to_rfc3339(),
        };
    }

    TradesResponse {
        trades: state.trades.clone(),
        total: state.total_trades,
        last_updated: now.to_rfc3339(),
    }
}

/// Fixed demo trade history shown before the bot reports anything
fn demo_trades() -> Vec<TradeRecord> {
    vec![
        TradeRecord {
            trade_id: "d3m0aaa1-0000-4000-8000-000000000001".to_string(),
            market: "ETH Up".to_string(),
            side: TradeSide::Buy,
            price: 0.88,
            shares: 2.317,
            profit: 0.28,
            time: "16:20".to_string(),
        },
        TradeRecord {
            trade_id: "d3m0aaa1-0000-4000-8000-000000000002".to_string(),
            market: "BTC Up".to_string(),
            side: TradeSide::Buy,
            price: 0.94,
            shares: 2.041,
            profit: -1.92,
            time: "16:22".to_string(),
        },
        TradeRecord {
            trade_id: "d3m0aaa1-0000-4000-8000-000000000003".to_string(),
            market: "BTC Down".to_string(),
            side: TradeSide::Buy,
            price: 0.91,
            shares: 2.218,
            profit: -2.02,
            time: "16:25".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_period_end_mid_period() {
        let now = at(2025, 1, 15, 16, 2, 30);
        assert_eq!(period_end(now, 15), at(2025, 1, 15, 16, 15, 0));

        let now = at(2025, 1, 15, 16, 59, 59);
        assert_eq!(period_end(now, 15), at(2025, 1, 15, 17, 0, 0));
    }

    #[test]
    fn test_period_end_on_boundary_rolls_forward() {
        let now = at(2025, 1, 15, 16, 15, 0);
        assert_eq!(period_end(now, 15), at(2025, 1, 15, 16, 30, 0));
    }

    #[test]
    fn test_time_remaining_format() {
        let end = at(2025, 1, 15, 16, 15, 0);
        assert_eq!(time_remaining(at(2025, 1, 15, 16, 0, 30), end), "14:30");
        assert_eq!(time_remaining(at(2025, 1, 15, 16, 14, 55), end), "00:05");
        assert_eq!(time_remaining(end, end), "00:00");
        // Past the end clamps instead of going negative
        assert_eq!(time_remaining(at(2025, 1, 15, 16, 20, 0), end), "00:00");
    }

    #[test]
    fn test_snapshot_invariants() {
        let config = Config::default();
        let now = at(2025, 1, 15, 16, 2, 30);
        let update = snapshot(&config, now);

        // One Up and one Down contract per symbol
        assert_eq!(update.markets.len(), config.symbols.len() * 2);
        assert_eq!(update.period, "15-minute");

        for quote in &update.markets {
            assert!(quote.bid < quote.ask, "bid >= ask for {}", quote.symbol);
            assert!(quote.bid > 0.0 && quote.ask < 1.0);
            assert_eq!(quote.time_remaining, "12:30");
        }

        // Up/Down bid pairs stay below 1.0 (no phantom arbitrage)
        for pair in update.markets.chunks(2) {
            assert!(
                pair[0].bid + pair[1].bid < 1.0,
                "{} + {} bids sum to an arbitrage",
                pair[0].symbol,
                pair[1].symbol
            );
        }
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let config = Config::default();
        let now = at(2025, 1, 15, 16, 2, 30);
        let a = snapshot(&config, now);
        let b = snapshot(&config, now);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_snapshot_without_simulation_is_empty() {
        let config = Config {
            simulate_markets: false,
            ..Config::default()
        };
        let update = snapshot(&config, at(2025, 1, 15, 16, 2, 30));
        assert!(update.markets.is_empty());
        assert!(!update.period_end.is_empty());
    }

    #[test]
    fn test_wobble_bounds() {
        for seed in 0..1000 {
            let w = wobble(seed);
            assert!((-0.05..=0.05).contains(&w), "wobble {w} out of range");
        }
    }

    #[test]
    fn test_trades_fall_back_to_demo_fixture() {
        let config = Config::default();
        let now = at(2025, 1, 15, 16, 30, 0);
        let response = build_trades_response(&DashboardStateData::default(), &config, now);

        assert_eq!(response.total, 3);
        assert_eq!(response.trades[0].market, "ETH Up");
        assert!((response.total_profit() - (-3.66)).abs() < 1e-9);
    }

    #[test]
    fn test_trades_prefer_reported_history() {
        let config = Config::default();
        let mut state = DashboardStateData::default();
        state.record_trade(
            TradeRecord {
                trade_id: String::new(),
                market: "SOL Down".to_string(),
                side: TradeSide::Sell,
                price: 0.55,
                shares: 10.0,
                profit: 1.25,
                time: "17:01".to_string(),
            },
            config.max_trades,
        );

        let response = build_trades_response(&state, &config, at(2025, 1, 15, 17, 2, 0));
        assert_eq!(response.trades.len(), 1);
        assert_eq!(response.trades[0].market, "SOL Down");
        assert_eq!(response.total, 1);
    }

    #[test]
    fn test_no_demo_fixture_without_simulation() {
        let config = Config {
            simulate_markets: false,
            ..Config::default()
        };
        let response =
            build_trades_response(&DashboardStateData::default(), &config, at(2025, 1, 15, 17, 0, 0));
        assert!(response.trades.is_empty());
        assert_eq!(response.total, 0);
    }
}
