//! Widget configuration in the shape the charting library's `createChart` /
//! `addCandlestickSeries` expect (camelCase JSON).

use serde::{Serialize, Serializer};

use crate::config::CHART_CONFIG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosshairMode {
    /// Follows the mouse freely
    Normal,
    /// Snaps to the close price of the hovered bar
    Magnet,
}

// The widget takes the numeric enum value, not a name
impl Serialize for CrosshairMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let code = match self {
            CrosshairMode::Normal => 0,
            CrosshairMode::Magnet => 1,
        };
        serializer.serialize_u8(code)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub background_color: String,
    pub text_color: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LineOptions {
    pub color: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub vert_lines: LineOptions,
    pub horz_lines: LineOptions,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CrosshairOptions {
    pub mode: CrosshairMode,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceScaleOptions {
    pub border_color: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeScaleOptions {
    pub border_color: String,
    pub time_visible: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub layout: LayoutOptions,
    pub grid: GridOptions,
    pub crosshair: CrosshairOptions,
    pub price_scale: PriceScaleOptions,
    pub time_scale: TimeScaleOptions,
}

impl ChartOptions {
    /// Dark theme from `CHART_CONFIG`, sized to the container's current width.
    pub fn dark(width: u32) -> Self {
        let grid_line = || LineOptions {
            color: CHART_CONFIG.grid_color.to_string(),
        };
        Self {
            width,
            height: CHART_CONFIG.height,
            layout: LayoutOptions {
                background_color: CHART_CONFIG.background_color.to_string(),
                text_color: CHART_CONFIG.text_color.to_string(),
            },
            grid: GridOptions {
                vert_lines: grid_line(),
                horz_lines: grid_line(),
            },
            crosshair: CrosshairOptions {
                mode: CrosshairMode::Normal,
            },
            price_scale: PriceScaleOptions {
                border_color: CHART_CONFIG.border_color.to_string(),
            },
            time_scale: TimeScaleOptions {
                border_color: CHART_CONFIG.border_color.to_string(),
                time_visible: CHART_CONFIG.time_visible,
            },
        }
    }
}

/// Applied on resize; only the width changes.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthUpdate {
    pub width: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub up_color: String,
    pub down_color: String,
    pub border_up_color: String,
    pub border_down_color: String,
    pub wick_up_color: String,
    pub wick_down_color: String,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            up_color: CHART_CONFIG.up.body.to_string(),
            down_color: CHART_CONFIG.down.body.to_string(),
            border_up_color: CHART_CONFIG.up.border.to_string(),
            border_down_color: CHART_CONFIG.down.border.to_string(),
            wick_up_color: CHART_CONFIG.up.wick.to_string(),
            wick_down_color: CHART_CONFIG.down.wick.to_string(),
        }
    }
}
