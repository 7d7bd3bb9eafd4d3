//! Dashboard module - bot monitor web interface
//!
//! Provides a single-page dashboard for monitoring the trading bot.
//! Separated into HTML, CSS, and JS submodules for maintainability.
//!
//! # Architecture
//! - `html.rs`: Page structure and layout
//! - `css.rs`: Styling with CSS custom properties
//! - `js.rs`: WebSocket feed, polling fallback, UI updates, bot controls
//!
//! # Features
//! - Bot status card with PID / CPU / memory / uptime
//! - Market overview with the 15-minute period countdown
//! - Trade history with win/loss statistics
//! - Health-check log
//! - Start / stop / restart controls

mod css;
mod html;
mod js;

/// Generate the complete dashboard HTML page
pub fn dashboard_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Polymarket Trading Dashboard</title>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        html = html::TEMPLATE,
        js = js::SCRIPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_assembles() {
        let page = dashboard_html();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("Polymarket Trading Dashboard"));
        assert!(page.contains("statusBadge"));
        assert!(page.contains("request:markets"));
    }
}
