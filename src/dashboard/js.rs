//! Dashboard JavaScript
//!
//! Client-side logic for the bot monitor:
//! - WebSocket feed with reconnection, falling back to polling
//! - Countdown ticking from the server-supplied period end
//! - Trade history and health-log refresh
//! - Start / stop / restart controls

pub const SCRIPT: &str = r#"
// ============================================================================
// Configuration
// ============================================================================
const CONFIG = {
    pollInterval: 5000,        // 5 seconds, matches the server push cadence
    tradesInterval: 10000,     // 10 seconds
    healthInterval: 30000,     // 30 seconds
    reconnectAttempts: 5,
    reconnectDelay: 1000,
    apiBase: ''
};

// ============================================================================
// State
// ============================================================================
let ws = null;
let wsConnected = false;
let reconnectCount = 0;
let pollTimer = null;
let periodEnd = null;
let botRunning = false;

// ============================================================================
// API Functions
// ============================================================================
async function fetchJSON(endpoint) {
    try {
        const res = await fetch(CONFIG.apiBase + endpoint);
        return await res.json();
    } catch (e) {
        console.error(`Error fetching ${endpoint}:`, e);
        return null;
    }
}

// ============================================================================
// Formatting Utilities
// ============================================================================
function formatUSD(value) {
    if (value == null || isNaN(value)) return '$--';
    const sign = value < 0 ? '-' : '';
    return sign + '$' + Math.abs(value).toFixed(2);
}

function formatChange(value) {
    if (value == null || isNaN(value)) return '--';
    const sign = value >= 0 ? '+' : '';
    return sign + value.toFixed(3);
}

function pnlClass(value) {
    if (value > 0) return 'positive';
    if (value < 0) return 'negative';
    return 'neutral';
}

function shortTime(iso) {
    if (!iso) return '--';
    return new Date(iso).toLocaleTimeString();
}

// ============================================================================
// WebSocket Feed
// ============================================================================
function connectWebSocket() {
    const proto = location.protocol === 'https:' ? 'wss:' : 'ws:';
    ws = new WebSocket(proto + '//' + location.host + '/ws');

    ws.onopen = () => {
        wsConnected = true;
        reconnectCount = 0;
        stopPolling();
        setConnBadge(true);
        refreshAll();
    };

    ws.onmessage = (msg) => {
        let envelope;
        try {
            envelope = JSON.parse(msg.data);
        } catch (e) {
            console.error('Bad WebSocket payload:', e);
            return;
        }
        if (envelope.event === 'markets:update') updateMarkets(envelope.data);
        if (envelope.event === 'bot:status') updateStatus(envelope.data);
    };

    ws.onclose = () => {
        wsConnected = false;
        setConnBadge(false);
        if (reconnectCount < CONFIG.reconnectAttempts) {
            reconnectCount++;
            setTimeout(connectWebSocket, CONFIG.reconnectDelay);
        } else {
            startPolling();
        }
    };

    ws.onerror = () => ws.close();
}

function wsRequest(event) {
    if (wsConnected && ws && ws.readyState === WebSocket.OPEN) {
        ws.send(JSON.stringify({ event }));
        return true;
    }
    return false;
}

// ============================================================================
// Polling Fallback
// ============================================================================
function startPolling() {
    if (pollTimer) return;
    pollTimer = setInterval(async () => {
        updateMarkets(await fetchJSON('/api/markets'));
        updateStatus(await fetchJSON('/api/status'));
    }, CONFIG.pollInterval);
}

function stopPolling() {
    if (pollTimer) {
        clearInterval(pollTimer);
        pollTimer = null;
    }
}

// ============================================================================
// UI Update Functions
// ============================================================================
function setConnBadge(live) {
    const badge = document.getElementById('connBadge');
    badge.textContent = live ? 'LIVE' : 'POLLING';
    badge.className = 'conn-badge ' + (live ? 'conn-live' : 'conn-polling');
}

function updateTimestamp() {
    document.getElementById('refreshTime').textContent =
        'Updated: ' + new Date().toLocaleTimeString();
}

function updateStatus(status) {
    if (!status) return;
    botRunning = !!status.running;

    const badge = document.getElementById('statusBadge');
    badge.textContent = botRunning ? 'Running' : 'Stopped';
    badge.className = 'status-badge ' + (botRunning ? 'status-running' : 'status-stopped');

    const chip = document.getElementById('healthChip');
    chip.textContent = status.health || '--';
    chip.className = 'health-chip ' + (status.health === 'HEALTHY' ? 'positive' : 'negative');

    document.getElementById('botPid').textContent = status.pid != null ? status.pid : '--';
    document.getElementById('botCpu').textContent =
        status.cpu != null ? status.cpu.toFixed(1) + '%' : '--';
    document.getElementById('botMemory').textContent =
        status.memory_mb != null ? status.memory_mb.toFixed(1) + ' MB' : '--';
    document.getElementById('botUptime').textContent = status.uptime || '--';
    document.getElementById('lastTrade').textContent = status.last_trade || '--';

    document.getElementById('startBtn').disabled = botRunning;
    document.getElementById('stopBtn').disabled = !botRunning;
    document.getElementById('restartBtn').disabled = !botRunning;

    updateTimestamp();
}

function updateMarkets(update) {
    if (!update || !update.markets) return;
    periodEnd = update.periodEnd || null;

    document.getElementById('periodType').textContent = update.period || '--';
    document.getElementById('periodEnd').textContent = shortTime(update.periodEnd);
    document.getElementById('marketsUpdated').textContent =
        'Updated: ' + shortTime(update.timestamp);

    const tbody = document.getElementById('marketsBody');
    if (update.markets.length === 0) {
        tbody.innerHTML = '<tr><td colspan="6" style="text-align: center; color: var(--text-dim);">No market data</td></tr>';
        return;
    }

    tbody.innerHTML = update.markets.map(m => {
        const spread = m.ask - m.bid;
        const mid = (m.bid + m.ask) / 2;
        const prob = m.symbol.toUpperCase().includes('UP') ? mid * 100 : (1 - mid) * 100;
        return `<tr>
            <td><strong>${m.symbol}</strong></td>
            <td>$${m.bid.toFixed(3)}</td>
            <td>$${m.ask.toFixed(3)}</td>
            <td class="neutral">$${spread.toFixed(3)}</td>
            <td>${prob.toFixed(1)}%</td>
            <td class="${pnlClass(m.change)}">${formatChange(m.change)}</td>
        </tr>`;
    }).join('');
}

function updateTrades(history) {
    if (!history || !history.trades) return;

    const trades = history.trades;
    const totalProfit = trades.reduce((sum, t) => sum + t.profit, 0);
    const wins = trades.filter(t => t.profit > 0).length;
    const winRate = trades.length > 0 ? Math.round(wins / trades.length * 100) : 0;
    const avg = trades.length > 0 ? totalProfit / trades.length : 0;

    const profitEl = document.getElementById('totalProfit');
    profitEl.textContent = formatUSD(totalProfit);
    profitEl.className = 'card-value ' + pnlClass(totalProfit);
    document.getElementById('totalTrades').textContent = history.total || trades.length;
    document.getElementById('winRate').textContent = winRate + '%';
    document.getElementById('avgTrade').textContent = formatUSD(avg);
    document.getElementById('tradesUpdated').textContent =
        'Updated: ' + shortTime(history.lastUpdated);

    const tbody = document.getElementById('tradesBody');
    if (trades.length === 0) {
        tbody.innerHTML = '<tr><td colspan="8" style="text-align: center; color: var(--text-dim);">No trades yet</td></tr>';
        return;
    }

    tbody.innerHTML = trades.slice(0, 20).map(t => {
        const cost = t.price * t.shares;
        const win = t.profit >= 0;
        return `<tr>
            <td class="trade-id">${(t.trade_id || '').substring(0, 8)}...</td>
            <td>${t.market}</td>
            <td><span class="side-chip ${t.side === 'BUY' ? 'side-buy' : 'side-sell'}">${t.side}</span></td>
            <td>$${t.price.toFixed(3)}</td>
            <td>${t.shares.toFixed(4)}</td>
            <td class="neutral">$${cost.toFixed(2)}</td>
            <td class="${pnlClass(t.profit)}">${formatUSD(t.profit)}</td>
            <td><span class="result-chip ${win ? 'result-win' : 'result-loss'}">${win ? 'WIN' : 'LOSS'}</span></td>
        </tr>`;
    }).join('');
}

function updateHealthLog(data) {
    if (!data || !data.logs) return;
    const list = document.getElementById('healthLog');

    if (data.logs.length === 0) {
        list.innerHTML = '<div class="log-entry">No health checks recorded yet</div>';
        return;
    }

    list.innerHTML = data.logs.map(log => {
        const bad = log.status !== 'HEALTHY';
        return `<div class="log-entry${bad ? ' log-bad' : ''}">
            <span>${log.message}</span>
            <span class="log-time">${log.timestamp}</span>
        </div>`;
    }).join('');
}

// ============================================================================
// Countdown
// ============================================================================
function tickCountdown() {
    const el = document.getElementById('countdown');
    if (!periodEnd) {
        el.textContent = '--:--';
        return;
    }
    const diff = new Date(periodEnd) - new Date();
    if (diff <= 0) {
        el.textContent = '00:00';
        return;
    }
    const minutes = Math.floor(diff / 60000);
    const seconds = Math.floor((diff % 60000) / 1000);
    el.textContent = `${String(minutes).padStart(2, '0')}:${String(seconds).padStart(2, '0')}`;
}

// ============================================================================
// Bot Controls
// ============================================================================
async function sendControl(action) {
    const prompts = {
        start: 'Start the trading bot?',
        stop: 'Stop the trading bot? This will cancel all pending orders.',
        restart: 'Restart the trading bot? This will interrupt any active trades.'
    };
    if (!window.confirm(prompts[action])) return;

    try {
        const res = await fetch('/api/bot/' + action, { method: 'POST' });
        const data = await res.json();
        if (!res.ok) {
            alert('Error: ' + (data.message || res.statusText));
        } else {
            alert(data.message);
        }
    } catch (e) {
        alert('Error: ' + e.message);
    }
    refreshAll();
}

// ============================================================================
// Refresh
// ============================================================================
async function refreshAll() {
    if (!wsRequest('request:markets')) updateMarkets(await fetchJSON('/api/markets'));
    if (!wsRequest('request:status')) updateStatus(await fetchJSON('/api/status'));
    updateTrades(await fetchJSON('/api/trades'));
    updateHealthLog(await fetchJSON('/api/health'));
}

// ============================================================================
// Initialization
// ============================================================================
connectWebSocket();
refreshAll();
setInterval(tickCountdown, 1000);
setInterval(async () => updateTrades(await fetchJSON('/api/trades')), CONFIG.tradesInterval);
setInterval(async () => updateHealthLog(await fetchJSON('/api/health')), CONFIG.healthInterval);
"#;
