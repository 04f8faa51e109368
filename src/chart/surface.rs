//! The seams between the chart adapter and whatever actually draws.
//!
//! The browser build implements these over the DOM and the charting widget; tests
//! and the native binary implement them over plain data.

use thiserror::Error;

use crate::chart::options::{ChartOptions, SeriesStyle};
use crate::config::UI_TEXT;
use crate::domain::Candle;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("chart widget error: {0}")]
    Widget(String),
}

/// Handle for a registered resize observer, needed to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Static failure panel shown in place of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub title: String,
    pub hint: String,
    pub detail: String,
}

impl ErrorPanel {
    pub fn new(title: &str, detail: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            hint: UI_TEXT.failure_hint.to_string(),
            detail: detail.into(),
        }
    }
}

/// What the chart container currently shows. Each variant replaces the previous contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerView {
    Empty,
    Loading { message: String },
    /// The widget with its data; any loading overlay is gone
    Chart,
    Error(ErrorPanel),
}

impl ContainerView {
    pub fn loading() -> Self {
        ContainerView::Loading {
            message: UI_TEXT.loading.to_string(),
        }
    }
}

pub trait CandleSeries {
    fn set_data(&mut self, candles: &[Candle]) -> Result<(), ViewError>;
}

pub trait ChartWidget {
    type Series: CandleSeries;

    fn add_candlestick_series(&mut self, style: &SeriesStyle) -> Result<Self::Series, ViewError>;

    fn apply_width(&mut self, width: u32);

    /// Destroy the widget. Called exactly once before the handle is dropped.
    fn remove(&mut self) {}
}

/// The chart container element plus the window it lives in.
pub trait ChartSurface {
    type Chart: ChartWidget;

    fn container_width(&self) -> Result<u32, ViewError>;

    fn show(&mut self, view: &ContainerView) -> Result<(), ViewError>;

    fn create_chart(&mut self, options: &ChartOptions) -> Result<Self::Chart, ViewError>;

    /// Start re-applying the container width to `chart` whenever the window resizes.
    fn watch_resize(&mut self, chart: &Self::Chart) -> Result<ListenerId, ViewError>;

    fn unwatch_resize(&mut self, id: ListenerId);
}

/// The symbol and interval fields. Setters are how substituted defaults become visible.
pub trait MarketInputs {
    fn symbol(&self) -> Result<String, ViewError>;
    fn interval(&self) -> Result<String, ViewError>;
    fn set_symbol(&mut self, symbol: &str) -> Result<(), ViewError>;
    fn set_interval(&mut self, interval: &str) -> Result<(), ViewError>;
}
