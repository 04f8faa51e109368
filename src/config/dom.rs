//! Element ids the browser binding looks up.

pub struct DomIds {
    pub symbol_input: &'static str,
    pub interval_input: &'static str,
    pub chart_container: &'static str,
    pub bot_button: &'static str,
    pub bot_badge: &'static str,
    /// Alert banners go here; created at the top of `.container-fluid` if missing
    pub alerts: &'static str,
    pub alerts_fallback_parent: &'static str,
    /// Wrapper around the loading spinner, dropped once the candles are in
    pub loading_overlay: &'static str,
}

pub const DOM_IDS: DomIds = DomIds {
    symbol_input: "symbol",
    interval_input: "interval",
    chart_container: "tradingview-widget-container",
    bot_button: "start-bot-btn",
    bot_badge: "bot-status",
    alerts: "alerts",
    alerts_fallback_parent: ".container-fluid",
    loading_overlay: "chart-loading",
};
