//! Dashboard HTML template
//!
//! Contains the main page structure including:
//! - Header with connection badge and controls
//! - Bot status card with process metrics
//! - Trading period card with countdown
//! - Market overview tables
//! - Trade history with statistics
//! - Health-check log

pub const TEMPLATE: &str = r#"
    <div class="container">
        <header>
            <div>
                <h1>🚀 Polymarket Trading Dashboard</h1>
                <span class="refresh-time" id="refreshTime">Loading...</span>
            </div>
            <div class="header-controls">
                <span class="conn-badge conn-polling" id="connBadge">CONNECTING</span>
                <span class="status-badge status-stopped" id="statusBadge">Loading</span>
                <button class="btn btn-secondary" onclick="refreshAll()" id="refreshBtn">🔄 Refresh</button>
            </div>
        </header>

        <div class="grid">
            <!-- Bot Status Card -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">🤖 Bot Status</span>
                    <span class="health-chip" id="healthChip">--</span>
                </div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">PID</div>
                        <div class="metric-value" id="botPid">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">CPU</div>
                        <div class="metric-value" id="botCpu">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Memory</div>
                        <div class="metric-value" id="botMemory">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Uptime</div>
                        <div class="metric-value" id="botUptime">--</div>
                    </div>
                </div>
                <div class="last-trade">
                    <span class="metric-label">Last Trade</span>
                    <span id="lastTrade">--</span>
                </div>
            </div>

            <!-- Trading Period Card -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">⏱ Trading Period</span>
                </div>
                <div class="card-value countdown" id="countdown">--:--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">Type</div>
                        <div class="metric-value" id="periodType">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Period End</div>
                        <div class="metric-value" id="periodEnd">--</div>
                    </div>
                </div>
            </div>

            <!-- Performance Card -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">📊 Performance</span>
                </div>
                <div class="card-value" id="totalProfit">$--</div>
                <div class="metrics">
                    <div class="metric">
                        <div class="metric-label">Trades</div>
                        <div class="metric-value" id="totalTrades">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Win Rate</div>
                        <div class="metric-value" id="winRate">--</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Avg Trade</div>
                        <div class="metric-value" id="avgTrade">--</div>
                    </div>
                </div>
            </div>

            <!-- Controls Card -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">⚡ Bot Controls</span>
                </div>
                <div class="controls">
                    <button class="btn btn-primary" onclick="sendControl('start')" id="startBtn">▶ Start</button>
                    <button class="btn btn-danger" onclick="sendControl('stop')" id="stopBtn">■ Stop</button>
                    <button class="btn btn-secondary" onclick="sendControl('restart')" id="restartBtn">↻ Restart</button>
                </div>
                <p class="controls-note">Commands are queued and picked up by the bot's next heartbeat.</p>
            </div>

            <!-- Market Overview -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">📈 Market Overview</span>
                    <span class="refresh-time" id="marketsUpdated"></span>
                </div>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>Contract</th>
                            <th>Bid</th>
                            <th>Ask</th>
                            <th>Spread</th>
                            <th>Implied Prob</th>
                            <th>Change</th>
                        </tr>
                    </thead>
                    <tbody id="marketsBody">
                        <tr><td colspan="6" style="text-align: center; color: var(--text-dim);">Loading...</td></tr>
                    </tbody>
                </table>
            </div>

            <!-- Trade History -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">💱 Trade History</span>
                    <span class="refresh-time" id="tradesUpdated"></span>
                </div>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>Trade ID</th>
                            <th>Market</th>
                            <th>Side</th>
                            <th>Price</th>
                            <th>Shares</th>
                            <th>Cost</th>
                            <th>Profit</th>
                            <th>Status</th>
                        </tr>
                    </thead>
                    <tbody id="tradesBody">
                        <tr><td colspan="8" style="text-align: center; color: var(--text-dim);">Loading...</td></tr>
                    </tbody>
                </table>
            </div>

            <!-- Health Check Log -->
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">🩺 Health Check Log</span>
                </div>
                <div class="log-list" id="healthLog">
                    <div class="log-entry">Loading...</div>
                </div>
            </div>
        </div>
    </div>
"#;
