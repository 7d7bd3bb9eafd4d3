//! Common types for the dashboard worker
//!
//! All wire shapes served to the dashboard plus the KV-persisted state.

use serde::{Deserialize, Serialize};

/// Bot health classification shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthState {
    #[default]
    Healthy,
    Stopped,
    Error,
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Healthy => write!(f, "HEALTHY"),
            HealthState::Stopped => write!(f, "STOPPED"),
            HealthState::Error => write!(f, "ERROR"),
        }
    }
}

/// Trade side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Snapshot of the external bot process, served by `/api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotStatus {
    pub running: bool,
    pub pid: Option<u32>,
    pub cpu: f64,
    pub memory_mb: f64,
    pub uptime: String,
    pub last_trade: String,
    pub health: HealthState,
    pub timestamp: String,
    pub source: String,
}

/// A heartbeat pushed by the bot (or parsed from its health-log line)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatReport {
    pub pid: u32,
    pub cpu: f64,
    pub memory_mb: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trade: Option<String>,
    /// Trades completed since the last heartbeat
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trades: Vec<TradeRecord>,
    /// Set server-side when the heartbeat is recorded (ms since epoch)
    #[serde(default)]
    pub received_at_ms: u64,
}

/// One Up or Down contract quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    pub symbol: String,
    pub bid: f64,
    pub ask: f64,
    pub change: f64,
    #[serde(rename = "timeRemaining")]
    pub time_remaining: String,
}

impl MarketQuote {
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Implied probability of the underlying moving up.
    /// An Up contract prices the event directly; a Down contract its complement.
    pub fn implied_probability(&self) -> f64 {
        if self.symbol.to_uppercase().contains("UP") {
            self.mid() * 100.0
        } else {
            (1.0 - self.mid()) * 100.0
        }
    }
}

/// Markets payload served by `/api/markets` and pushed as `markets:update`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketsUpdate {
    pub timestamp: String,
    pub period: String,
    #[serde(rename = "periodEnd")]
    pub period_end: String,
    pub markets: Vec<MarketQuote>,
}

/// A completed trade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub trade_id: String,
    pub market: String,
    pub side: TradeSide,
    pub price: f64,
    pub shares: f64,
    pub profit: f64,
    pub time: String,
}

impl TradeRecord {
    pub fn cost(&self) -> f64 {
        self.price * self.shares
    }

    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }
}

/// Trade history payload served by `/api/trades`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradesResponse {
    pub trades: Vec<TradeRecord>,
    pub total: u64,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

impl TradesResponse {
    pub fn total_profit(&self) -> f64 {
        self.trades.iter().map(|t| t.profit).sum()
    }

    /// Win rate over the retained trades, in percent
    pub fn win_rate(&self) -> f64 {
        if self.trades.is_empty() {
            return 0.0;
        }
        let wins = self.trades.iter().filter(|t| t.is_win()).count();
        wins as f64 / self.trades.len() as f64 * 100.0
    }
}

/// One line of the health-check log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthLogEntry {
    pub timestamp: String,
    pub status: HealthState,
    pub message: String,
}

/// Control command for the bot, consumed via its next heartbeat ack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotCommand {
    Start,
    Stop,
    Restart,
}

impl std::fmt::Display for BotCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotCommand::Start => write!(f, "start"),
            BotCommand::Stop => write!(f, "stop"),
            BotCommand::Restart => write!(f, "restart"),
        }
    }
}

impl std::str::FromStr for BotCommand {
    type Err = crate::error::DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(BotCommand::Start),
            "stop" => Ok(BotCommand::Stop),
            "restart" => Ok(BotCommand::Restart),
            other => Err(crate::error::DashboardError::InvalidCommand(
                other.to_string(),
            )),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Persistent dashboard state stored in KV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStateData {
    /// Last requested run state (start sets true, stop sets false)
    #[serde(default = "default_enabled")]
    pub bot_enabled: bool,

    /// Most recent heartbeat from the bot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<HeartbeatReport>,

    /// Health-check log, newest first
    #[serde(default)]
    pub health_log: Vec<HealthLogEntry>,

    /// Trade history, newest first
    #[serde(default)]
    pub trades: Vec<TradeRecord>,

    /// Command waiting for the bot's next heartbeat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_command: Option<BotCommand>,

    /// Total trades ever recorded (survives ring trimming)
    #[serde(default)]
    pub total_trades: u64,
}

impl Default for DashboardStateData {
    fn default() -> Self {
        Self {
            bot_enabled: true,
            last_heartbeat: None,
            health_log: Vec::new(),
            trades: Vec::new(),
            pending_command: None,
            total_trades: 0,
        }
    }
}

impl DashboardStateData {
    /// Record a heartbeat from the bot
    pub fn record_heartbeat(&mut self, report: HeartbeatReport) {
        self.last_heartbeat = Some(report);
    }

    /// Prepend a health-log entry, keeping at most `max` entries
    pub fn push_health_entry(&mut self, entry: HealthLogEntry, max: usize) {
        self.health_log.insert(0, entry);
        self.health_log.truncate(max);
    }

    /// Prepend a trade, assigning an id when the bot sent none
    pub fn record_trade(&mut self, mut trade: TradeRecord, max: usize) {
        if trade.trade_id.is_empty() {
            trade.trade_id = uuid::Uuid::new_v4().to_string();
        }
        self.trades.insert(0, trade);
        self.trades.truncate(max);
        self.total_trades += 1;
    }

    /// Queue a control command (replaces any earlier pending one)
    pub fn set_command(&mut self, command: BotCommand) {
        self.pending_command = Some(command);
        match command {
            BotCommand::Start | BotCommand::Restart => self.bot_enabled = true,
            BotCommand::Stop => self.bot_enabled = false,
        }
    }

    /// Hand the pending command to the bot and clear the mailbox
    pub fn take_pending_command(&mut self) -> Option<BotCommand> {
        self.pending_command.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trade(profit: f64) -> TradeRecord {
        TradeRecord {
            trade_id: String::new(),
            market: "BTC Up".to_string(),
            side: TradeSide::Buy,
            price: 0.88,
            shares: 2.317,
            profit,
            time: "16:20".to_string(),
        }
    }

    #[test]
    fn test_quote_derived_values() {
        let quote = MarketQuote {
            symbol: "BTC Up".to_string(),
            bid: 0.40,
            ask: 0.44,
            change: 0.01,
            time_remaining: "12:30".to_string(),
        };
        assert!((quote.spread() - 0.04).abs() < 1e-9);
        assert!((quote.mid() - 0.42).abs() < 1e-9);
        assert!((quote.implied_probability() - 42.0).abs() < 1e-9);

        let down = MarketQuote {
            symbol: "BTC Down".to_string(),
            ..quote
        };
        assert!((down.implied_probability() - 58.0).abs() < 1e-9);
    }

    #[test]
    fn test_quote_serializes_camel_case() {
        let quote = MarketQuote {
            symbol: "ETH Up".to_string(),
            bid: 0.3,
            ask: 0.33,
            change: -0.02,
            time_remaining: "05:00".to_string(),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["timeRemaining"], "05:00");
        assert!(json.get("time_remaining").is_none());
    }

    #[test]
    fn test_trade_stats() {
        let response = TradesResponse {
            trades: vec![sample_trade(0.28), sample_trade(-1.92), sample_trade(-2.02)],
            total: 3,
            last_updated: "2025-01-01T00:00:00Z".to_string(),
        };
        assert!((response.total_profit() - (-3.66)).abs() < 1e-9);
        assert!((response.win_rate() - 33.333_333).abs() < 0.001);

        let empty = TradesResponse {
            trades: vec![],
            total: 0,
            last_updated: String::new(),
        };
        assert!((empty.win_rate() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_trade_cost() {
        let trade = sample_trade(0.28);
        assert!((trade.cost() - 0.88 * 2.317).abs() < 1e-9);
        assert!(trade.is_win());
        assert!(!sample_trade(-1.0).is_win());
        assert!(!sample_trade(0.0).is_win());
    }

    #[test]
    fn test_record_trade_assigns_id_and_trims() {
        let mut state = DashboardStateData::default();
        for _ in 0..5 {
            state.record_trade(sample_trade(1.0), 3);
        }
        assert_eq!(state.trades.len(), 3);
        assert_eq!(state.total_trades, 5);
        assert!(state.trades.iter().all(|t| !t.trade_id.is_empty()));
    }

    #[test]
    fn test_health_log_ring() {
        let mut state = DashboardStateData::default();
        for i in 0..4 {
            state.push_health_entry(
                HealthLogEntry {
                    timestamp: format!("17:0{i}:05"),
                    status: HealthState::Healthy,
                    message: "Bot running".to_string(),
                },
                3,
            );
        }
        assert_eq!(state.health_log.len(), 3);
        // Newest first
        assert_eq!(state.health_log[0].timestamp, "17:03:05");
    }

    #[test]
    fn test_command_mailbox() {
        let mut state = DashboardStateData::default();
        assert!(state.take_pending_command().is_none());

        state.set_command(BotCommand::Stop);
        assert!(!state.bot_enabled);
        state.set_command(BotCommand::Restart);
        assert!(state.bot_enabled);

        assert_eq!(state.take_pending_command(), Some(BotCommand::Restart));
        assert!(state.take_pending_command().is_none());
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!("start".parse::<BotCommand>().unwrap(), BotCommand::Start);
        assert_eq!("STOP".parse::<BotCommand>().unwrap(), BotCommand::Stop);
        assert!("reboot".parse::<BotCommand>().is_err());
    }

    #[test]
    fn test_health_state_wire_format() {
        assert_eq!(
            serde_json::to_string(&HealthState::Healthy).unwrap(),
            "\"HEALTHY\""
        );
        assert_eq!(
            serde_json::to_string(&HealthState::Stopped).unwrap(),
            "\"STOPPED\""
        );
        assert_eq!(HealthState::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_state_round_trip() {
        let mut state = DashboardStateData::default();
        state.record_heartbeat(HeartbeatReport {
            pid: 34612,
            cpu: 9.7,
            memory_mb: 17.36,
            last_trade: None,
            trades: vec![],
            received_at_ms: 1_700_000_000_000,
        });
        state.set_command(BotCommand::Stop);

        let json = serde_json::to_string(&state).unwrap();
        let back: DashboardStateData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pending_command, Some(BotCommand::Stop));
        assert_eq!(back.last_heartbeat.unwrap().pid, 34612);
    }
}
