//! Polymarket Dashboard - Trading Bot Monitor for Cloudflare Workers
//!
//! A monitoring dashboard for an external Polymarket trading bot.
//!
//! # Architecture
//! - Main entry point handles HTTP requests and scheduled triggers
//! - KV storage for heartbeats, health log, and trade history
//! - The bot POSTs heartbeats in; nothing here touches the bot's process
//!
//! # Features
//! - Bot status with heartbeat staleness detection
//! - 15-minute period market snapshots with server-side countdown
//! - Trade history with win/loss statistics
//! - WebSocket feed with polling fallback
//! - Web dashboard for monitoring

// Clippy configuration for dashboard code patterns
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns
#![allow(clippy::unused_async)] // Router requires async handlers

mod config;
mod dashboard;
mod error;
mod markets;
mod status;
mod types;
mod ws;

use worker::{
    Context, Env, Request, Response, Router, ScheduleContext, ScheduledEvent, console_log,
    console_warn, event,
};

pub use config::Config;
pub use error::DashboardError;
pub use types::*;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

const STATE_KEY: &str = "dashboard_state";

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "environment": config.environment,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        })
        // Dashboard UI
        .get("/", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        .get("/dashboard", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        // Bot status snapshot
        .get_async("/api/status", |_req, ctx| async move {
            let config = Config::from_env(&ctx.env)?;
            let state = get_dashboard_state(&ctx.env).await?;
            Response::from_json(&status::bot_status(&state, &config, chrono::Utc::now()))
        })
        // Market snapshots with the period countdown
        .get_async("/api/markets", |_req, ctx| async move {
            let config = Config::from_env(&ctx.env)?;
            Response::from_json(&markets::snapshot(&config, chrono::Utc::now()))
        })
        // Trade history
        .get_async("/api/trades", |_req, ctx| async move {
            let config = Config::from_env(&ctx.env)?;
            let state = get_dashboard_state(&ctx.env).await?;
            Response::from_json(&markets::build_trades_response(
                &state,
                &config,
                chrono::Utc::now(),
            ))
        })
        // Health-check log, newest first
        .get_async("/api/health", |_req, ctx| async move {
            let state = get_dashboard_state(&ctx.env).await?;
            Response::from_json(&serde_json::json!({
                "logs": state.health_log,
            }))
        })
        // Heartbeat ingest from the bot (JSON report or raw health-log line)
        .post_async("/api/heartbeat", |mut req, ctx| async move {
            let body = req.text().await?;
            let report = match parse_heartbeat_body(&body) {
                Ok(r) => r,
                Err(e) => return Response::error(format!("Bad heartbeat: {e}"), 400),
            };

            match record_heartbeat(&ctx.env, report).await {
                Ok(ack) => Response::from_json(&ack),
                Err(e) => Response::error(format!("{e}"), 500),
            }
        })
        // Control mailbox: start / stop / restart
        .post_async("/api/bot/:action", |_req, ctx| async move {
            let Some(action) = ctx.param("action") else {
                return Response::error("Missing action", 400);
            };
            let command: BotCommand = match action.parse() {
                Ok(c) => c,
                Err(e) => return Response::error(format!("{e}"), 400),
            };

            let mut state = get_dashboard_state(&ctx.env).await?;
            state.set_command(command);
            save_dashboard_state(&ctx.env, &state).await?;

            console_log!("Control requested: {}", command);
            Response::from_json(&serde_json::json!({
                "action": command,
                "bot_enabled": state.bot_enabled,
                "message": format!("{command} queued; the bot picks it up on its next heartbeat"),
            }))
        })
        // Live feed
        .get_async("/ws", |req, ctx| async move {
            ws::upgrade(&req, ctx.env.clone())
        })
        // Fallback
        .run(req, env)
        .await
}

/// Scheduled trigger (cron job) - append a health-log entry
#[event(scheduled)]
async fn scheduled(_event: ScheduledEvent, env: Env, _ctx: ScheduleContext) {
    console_error_panic_hook::set_once();

    if let Err(e) = run_health_check(&env).await {
        console_log!("Health check error: {}", e);
    }
}

/// Derive the current status and log it, the way the bot-side health checker
/// used to append to its log file
async fn run_health_check(env: &Env) -> std::result::Result<(), DashboardError> {
    let config = Config::from_env(env)?;
    let mut state = get_dashboard_state(env)
        .await
        .map_err(|e| DashboardError::Storage(e.to_string()))?;

    let now = chrono::Utc::now();
    let current = status::bot_status(&state, &config, now);

    if !current.running {
        console_warn!(
            "No heartbeat from bot for over {}s",
            config.heartbeat_stale_seconds
        );
    }

    state.push_health_entry(
        status::health_entry_for(&current, now),
        config.max_health_log_entries,
    );
    save_dashboard_state(env, &state)
        .await
        .map_err(|e| DashboardError::Storage(e.to_string()))?;

    Ok(())
}

/// Accept either a structured JSON heartbeat or a raw health-log line
fn parse_heartbeat_body(body: &str) -> std::result::Result<HeartbeatReport, DashboardError> {
    match serde_json::from_str::<HeartbeatReport>(body) {
        Ok(report) => Ok(report),
        Err(_) => status::parse_health_line(body),
    }
}

/// Store a heartbeat, record any reported trades, log a health entry, and
/// hand back the pending control command
async fn record_heartbeat(
    env: &Env,
    mut report: HeartbeatReport,
) -> std::result::Result<serde_json::Value, DashboardError> {
    let config = Config::from_env(env)?;
    let mut state = get_dashboard_state(env)
        .await
        .map_err(|e| DashboardError::Storage(e.to_string()))?;

    let now = chrono::Utc::now();
    report.received_at_ms = now.timestamp_millis().max(0) as u64;

    let trades = std::mem::take(&mut report.trades);
    for trade in trades {
        state.record_trade(trade, config.max_trades);
    }
    state.record_heartbeat(report);

    let current = status::bot_status(&state, &config, now);
    state.push_health_entry(
        status::health_entry_for(&current, now),
        config.max_health_log_entries,
    );

    let command = state.take_pending_command();
    save_dashboard_state(env, &state)
        .await
        .map_err(|e| DashboardError::Storage(e.to_string()))?;

    Ok(serde_json::json!({
        "status": "ok",
        "command": command,
        "bot_enabled": state.bot_enabled,
        "timestamp": now.to_rfc3339(),
    }))
}

/// Get dashboard state from KV storage
pub(crate) async fn get_dashboard_state(env: &Env) -> WResult<DashboardStateData> {
    let kv = env.kv("STATE")?;

    match kv.get(STATE_KEY).json::<DashboardStateData>().await? {
        Some(state) => Ok(state),
        None => Ok(DashboardStateData::default()),
    }
}

/// Save dashboard state to KV storage
async fn save_dashboard_state(env: &Env, state: &DashboardStateData) -> WResult<()> {
    let kv = env.kv("STATE")?;
    kv.put(STATE_KEY, state)?.execute().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heartbeat_json_body() {
        let body = r#"{"pid": 34612, "cpu": 9.7, "memory_mb": 17.36}"#;
        let report = parse_heartbeat_body(body).unwrap();
        assert_eq!(report.pid, 34612);
        assert!(report.trades.is_empty());
    }

    #[test]
    fn test_parse_heartbeat_log_line_body() {
        let body = "[16:56:05] HEALTHY PID: 34612 CPU: 9.7% Memory: 17.36 MB";
        let report = parse_heartbeat_body(body).unwrap();
        assert_eq!(report.pid, 34612);
        assert!((report.memory_mb - 17.36).abs() < 1e-9);
    }

    #[test]
    fn test_parse_heartbeat_with_trades() {
        let body = r#"{
            "pid": 34612, "cpu": 0.0, "memory_mb": 17.0,
            "trades": [
                {"market": "BTC Up", "side": "BUY", "price": 0.94,
                 "shares": 2.041, "profit": -1.92, "time": "16:22"}
            ]
        }"#;
        let report = parse_heartbeat_body(body).unwrap();
        assert_eq!(report.trades.len(), 1);
        assert_eq!(report.trades[0].side, TradeSide::Buy);
    }

    #[test]
    fn test_parse_heartbeat_rejects_garbage() {
        assert!(parse_heartbeat_body("not a heartbeat").is_err());
        assert!(parse_heartbeat_body("{}").is_err());
    }
}
