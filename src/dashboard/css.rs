//! Dashboard CSS styles
//!
//! Contains all styling for the bot monitor UI.
//! Uses CSS custom properties (variables) for theming.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
    --yellow: #d29922;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    padding: 20px;
    min-height: 100vh;
}

.container { max-width: 1200px; margin: 0 auto; }

/* Header */
header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 24px; font-weight: 600; }

.header-controls {
    display: flex;
    align-items: center;
    gap: 12px;
}

.refresh-time { font-size: 12px; color: var(--text-dim); }

/* Badges */
.status-badge,
.conn-badge,
.health-chip {
    padding: 6px 12px;
    border-radius: 20px;
    font-size: 12px;
    font-weight: 600;
    text-transform: uppercase;
}

.status-running { background: rgba(63, 185, 80, 0.2); color: var(--green); }
.status-stopped { background: rgba(248, 81, 73, 0.2); color: var(--red); }
.conn-live { background: rgba(63, 185, 80, 0.2); color: var(--green); }
.conn-polling { background: rgba(210, 153, 34, 0.2); color: var(--yellow); }
.health-chip { font-size: 11px; padding: 4px 10px; }

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    transition: all 0.2s;
}

.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: var(--blue); color: #fff; }
.btn-primary:hover:not(:disabled) { background: #4c9aed; }
.btn-secondary { background: var(--border); color: var(--text); }
.btn-secondary:hover:not(:disabled) { background: #3d444d; }
.btn-danger { background: var(--red); color: #fff; }
.btn-danger:hover:not(:disabled) { background: #e5423c; }

/* Grid Layout */
.grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
    gap: 16px;
}

.wide { grid-column: 1 / -1; }

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
}

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 16px;
}

.card-title {
    font-size: 14px;
    color: var(--text-dim);
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.card-value { font-size: 28px; font-weight: 700; }
.countdown { font-variant-numeric: tabular-nums; color: var(--blue); }

/* Metrics Grid */
.metrics {
    display: flex;
    flex-wrap: wrap;
    gap: 16px;
    margin-top: 12px;
}

.metric { flex: 1; min-width: 90px; }
.metric-label { font-size: 11px; color: var(--text-dim); text-transform: uppercase; }
.metric-value { font-size: 18px; font-weight: 600; margin-top: 2px; }

.last-trade {
    display: flex;
    justify-content: space-between;
    margin-top: 16px;
    padding-top: 12px;
    border-top: 1px solid var(--border);
    font-size: 13px;
}

/* Colors */
.positive { color: var(--green); }
.negative { color: var(--red); }
.neutral { color: var(--text-dim); }

/* Controls */
.controls {
    display: flex;
    gap: 10px;
    margin-top: 8px;
}

.controls-note {
    font-size: 11px;
    color: var(--text-dim);
    margin-top: 12px;
}

/* Tables */
.data-table { width: 100%; margin-top: 12px; border-collapse: collapse; }

.data-table th,
.data-table td {
    text-align: left;
    padding: 10px 8px;
    border-bottom: 1px solid var(--border);
}

.data-table th {
    color: var(--text-dim);
    font-weight: 500;
    font-size: 12px;
    text-transform: uppercase;
}

.data-table tr:last-child td { border-bottom: none; }

.trade-id { font-family: ui-monospace, monospace; font-size: 12px; color: var(--text-dim); }

.side-chip,
.result-chip {
    font-size: 11px;
    padding: 3px 8px;
    border-radius: 4px;
    display: inline-block;
}

.side-buy { background: rgba(88, 166, 255, 0.2); color: var(--blue); }
.side-sell { background: rgba(163, 113, 247, 0.2); color: #a371f7; }
.result-win { background: rgba(63, 185, 80, 0.2); color: var(--green); }
.result-loss { background: rgba(248, 81, 73, 0.2); color: var(--red); }

/* Health Log */
.log-list { max-height: 220px; overflow-y: auto; margin-top: 8px; }

.log-entry {
    display: flex;
    justify-content: space-between;
    padding: 8px 10px;
    margin-bottom: 6px;
    border-radius: 6px;
    font-size: 13px;
    background: rgba(255, 255, 255, 0.03);
    border-left: 3px solid var(--green);
}

.log-entry.log-bad { border-left-color: var(--red); }
.log-entry .log-time { color: var(--text-dim); font-size: 12px; }

/* Responsive */
@media (max-width: 600px) {
    .grid { grid-template-columns: 1fr; }
    header { flex-direction: column; gap: 12px; }
    .header-controls { flex-wrap: wrap; justify-content: center; }
}
";
