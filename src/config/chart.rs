//! Chart visualization configuration

/// Candle colours for one direction (body, border and wick)
pub struct CandleColors {
    pub body: &'static str,
    pub border: &'static str,
    pub wick: &'static str,
}

pub struct ChartConfig {
    /// Fixed chart height in pixels; width follows the container
    pub height: u32,
    /// Height of the loading placeholder, so the page doesn't jump
    pub placeholder_height: u32,
    pub background_color: &'static str,
    pub text_color: &'static str,
    /// Vertical and horizontal grid lines
    pub grid_color: &'static str,
    /// Price scale and time scale borders
    pub border_color: &'static str,
    /// Show hours/minutes on the time axis, not just dates
    pub time_visible: bool,
    pub up: CandleColors,
    pub down: CandleColors,
}

pub const CHART_CONFIG: ChartConfig = ChartConfig {
    height: 400,
    placeholder_height: 400,
    background_color: "#131722",
    text_color: "#d1d4dc",
    grid_color: "rgba(42, 46, 57, 0.5)",
    border_color: "rgba(197, 203, 206, 0.8)",
    time_visible: true,
    up: CandleColors {
        body: "#26a69a", // Teal
        border: "#26a69a",
        wick: "#26a69a",
    },
    down: CandleColors {
        body: "#ef5350", // Red
        border: "#ef5350",
        wick: "#ef5350",
    },
};
