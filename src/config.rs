//! Configuration management for the dashboard worker

use crate::error::{DashboardError, Result};
use worker::Env;

/// Dashboard worker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// Base symbols to publish markets for (each yields an Up and a Down contract)
    pub symbols: Vec<String>,

    /// Trading period length in minutes (Polymarket short-term markets)
    pub period_minutes: u32,

    /// Bot considered stopped after this many seconds without a heartbeat
    pub heartbeat_stale_seconds: u64,

    /// WebSocket push cadence in seconds
    pub push_interval_seconds: u64,

    /// Health log ring size
    pub max_health_log_entries: usize,

    /// Retained trade history size
    pub max_trades: usize,

    /// Fabricate market quotes and demo trades when the bot reports nothing
    pub simulate_markets: bool,
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        Ok(Self {
            environment: env
                .var("ENVIRONMENT")
                .map_or_else(|_| "production".to_string(), |v| v.to_string()),

            log_level: env
                .var("LOG_LEVEL")
                .map_or_else(|_| "info".to_string(), |v| v.to_string()),

            symbols: env
                .var("SYMBOLS")
                .map(|v| v.to_string().split(',').map(String::from).collect())
                .unwrap_or_else(|_| {
                    vec![
                        "BTC".to_string(),
                        "ETH".to_string(),
                        "SOL".to_string(),
                        "XRP".to_string(),
                    ]
                }),

            period_minutes: env
                .var("PERIOD_MINUTES")
                .map(|v| v.to_string().parse().unwrap_or(15))
                .unwrap_or(15),

            heartbeat_stale_seconds: env
                .var("HEARTBEAT_STALE_SECONDS")
                .map(|v| v.to_string().parse().unwrap_or(240))
                .unwrap_or(240),  // Bot-side health checks run every 2 minutes

            push_interval_seconds: env
                .var("PUSH_INTERVAL_SECONDS")
                .map(|v| v.to_string().parse().unwrap_or(5))
                .unwrap_or(5),

            max_health_log_entries: env
                .var("MAX_HEALTH_LOG_ENTRIES")
                .map(|v| v.to_string().parse().unwrap_or(50))
                .unwrap_or(50),

            max_trades: env
                .var("MAX_TRADES")
                .map(|v| v.to_string().parse().unwrap_or(100))
                .unwrap_or(100),

            simulate_markets: env
                .var("SIMULATE_MARKETS")
                .map(|v| v.to_string().to_lowercase() == "true")
                .unwrap_or(true),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(DashboardError::Config("At least one symbol required".into()));
        }
        if self.period_minutes == 0 || self.period_minutes > 60 {
            return Err(DashboardError::Config("period_minutes must be 1-60".into()));
        }
        if self.heartbeat_stale_seconds == 0 {
            return Err(DashboardError::Config(
                "heartbeat_stale_seconds must be positive".into(),
            ));
        }
        if self.push_interval_seconds == 0 {
            return Err(DashboardError::Config(
                "push_interval_seconds must be positive".into(),
            ));
        }
        if self.max_health_log_entries == 0 {
            return Err(DashboardError::Config(
                "max_health_log_entries must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            log_level: "info".to_string(),
            symbols: vec![
                "BTC".to_string(),
                "ETH".to_string(),
                "SOL".to_string(),
                "XRP".to_string(),
            ],
            period_minutes: 15,
            heartbeat_stale_seconds: 240,
            push_interval_seconds: 5,
            max_health_log_entries: 50,
            max_trades: 100,
            simulate_markets: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_symbols() {
        let config = Config {
            symbols: vec![],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_period() {
        let config = Config {
            period_minutes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            period_minutes: 90,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_staleness() {
        let config = Config {
            heartbeat_stale_seconds: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
