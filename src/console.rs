//! Terminal rendition of the dashboard for the native binary: the "chart" is a log summary,
//! the controls are whatever came in on the command line.

use std::cell::RefCell;
use std::rc::Rc;

use crate::chart::{
    CandleSeries, ChartOptions, ChartSurface, ChartWidget, ContainerView, ListenerId,
    MarketInputs, SeriesStyle, ViewError,
};
use crate::domain::market_selection::{qualified_symbol, split_symbol};
use crate::domain::{Candle, CandleType, KlineQuery};
use crate::ui::format::{DEFAULT_CURRENCY, DEFAULT_DECIMALS, format_currency, format_percent};
use crate::ui::{AlertBanner, BotButtonView, ControlPanel};
use crate::utils::time_utils::{epoch_sec_to_utc, ms_to_sec};

/// What the last `set_data` delivered, boiled down.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub bullish: usize,
    pub bearish: usize,
    pub first_time: i64,
    pub last_time: i64,
    pub first_open: f64,
    pub last_close: f64,
    pub high: f64,
    pub low: f64,
}

impl SeriesSummary {
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        let first = candles.first()?;
        let last = candles.last()?;
        let bullish = candles
            .iter()
            .filter(|c| c.get_type() == CandleType::Bullish)
            .count();
        Some(Self {
            count: candles.len(),
            bullish,
            bearish: candles.len() - bullish,
            first_time: first.time,
            last_time: last.time,
            first_open: first.open,
            last_close: last.close,
            high: candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max),
            low: candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min),
        })
    }

    /// Bars absent between the first and last candle for a bucket width in milliseconds.
    pub fn missing_bars(&self, interval_ms: i64) -> usize {
        let step = ms_to_sec(interval_ms);
        if step <= 0 {
            return 0;
        }
        let expected = ((self.last_time - self.first_time) / step).max(0) as usize + 1;
        expected.saturating_sub(self.count)
    }

    /// Close-over-open for the whole window, in percent
    pub fn change_pct(&self) -> f64 {
        if self.first_open == 0.0 {
            return 0.0;
        }
        (self.last_close - self.first_open) / self.first_open * 100.0
    }
}

#[derive(Default)]
pub struct ConsoleSurface {
    width: u32,
    summary: Rc<RefCell<Option<SeriesSummary>>>,
    next_listener: u64,
}

impl ConsoleSurface {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        self.summary.borrow().clone()
    }
}

pub struct ConsoleChart {
    summary: Rc<RefCell<Option<SeriesSummary>>>,
}

pub struct ConsoleSeries {
    summary: Rc<RefCell<Option<SeriesSummary>>>,
}

impl CandleSeries for ConsoleSeries {
    fn set_data(&mut self, candles: &[Candle]) -> Result<(), ViewError> {
        *self.summary.borrow_mut() = SeriesSummary::from_candles(candles);
        Ok(())
    }
}

impl ChartWidget for ConsoleChart {
    type Series = ConsoleSeries;

    fn add_candlestick_series(&mut self, _style: &SeriesStyle) -> Result<ConsoleSeries, ViewError> {
        Ok(ConsoleSeries {
            summary: Rc::clone(&self.summary),
        })
    }

    fn apply_width(&mut self, width: u32) {
        log::debug!("Console chart width now {}", width);
    }

    fn remove(&mut self) {
        self.summary.borrow_mut().take();
    }
}

impl ChartSurface for ConsoleSurface {
    type Chart = ConsoleChart;

    fn container_width(&self) -> Result<u32, ViewError> {
        Ok(self.width)
    }

    fn show(&mut self, view: &ContainerView) -> Result<(), ViewError> {
        match view {
            ContainerView::Empty => {}
            ContainerView::Loading { message } => log::info!("⏳ {}", message),
            ContainerView::Chart => {
                if let Some(summary) = self.summary.borrow().as_ref() {
                    log_summary(summary);
                }
            }
            ContainerView::Error(panel) => {
                log::error!("❌ {} {}", panel.title, panel.hint);
                log::error!("   {}", panel.detail);
            }
        }
        Ok(())
    }

    fn create_chart(&mut self, options: &ChartOptions) -> Result<ConsoleChart, ViewError> {
        log::debug!("Console chart {}x{}", options.width, options.height);
        Ok(ConsoleChart {
            summary: Rc::clone(&self.summary),
        })
    }

    // A terminal never resizes under us; ids are still handed out so the adapter can pair them.
    fn watch_resize(&mut self, _chart: &ConsoleChart) -> Result<ListenerId, ViewError> {
        self.next_listener += 1;
        Ok(ListenerId(self.next_listener))
    }

    fn unwatch_resize(&mut self, _id: ListenerId) {}
}

fn log_summary(summary: &SeriesSummary) {
    log::info!(
        "🕯️ {} candles from {} to {} ({} up / {} down)",
        summary.count,
        epoch_sec_to_utc(summary.first_time),
        epoch_sec_to_utc(summary.last_time),
        summary.bullish,
        summary.bearish
    );
}

/// Command-line stand-in for the form: values are fixed at start-up, output goes to the log.
#[derive(Debug, Clone)]
pub struct ConsoleControls {
    symbol: String,
    interval: String,
}

impl ConsoleControls {
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
        }
    }

    /// Price line for the summary, in the pair's quote currency when we can tell what it is.
    pub fn describe(&self, summary: &SeriesSummary) -> String {
        let currency = split_symbol(&self.symbol)
            .map(|(_, quote)| quote)
            .unwrap_or(DEFAULT_CURRENCY);
        let mut line = format!(
            "{} {}: last {} | high {} | low {} | change {}",
            qualified_symbol(&self.symbol),
            self.interval,
            format_currency(summary.last_close, currency, DEFAULT_DECIMALS),
            format_currency(summary.high, currency, DEFAULT_DECIMALS),
            format_currency(summary.low, currency, DEFAULT_DECIMALS),
            format_percent(summary.change_pct(), DEFAULT_DECIMALS)
        );
        // Unknown intervals have no width to check against
        let query = KlineQuery::new(self.symbol.as_str(), self.interval.as_str());
        if let Some(missing) = query.interval_ms().map(|ms| summary.missing_bars(ms)) {
            if missing > 0 {
                line.push_str(&format!(" | {} missing bars", missing));
            }
        }
        line
    }
}

impl MarketInputs for ConsoleControls {
    fn symbol(&self) -> Result<String, ViewError> {
        Ok(self.symbol.clone())
    }

    fn interval(&self) -> Result<String, ViewError> {
        Ok(self.interval.clone())
    }

    fn set_symbol(&mut self, symbol: &str) -> Result<(), ViewError> {
        log::info!("Symbol set to {}", symbol);
        self.symbol = symbol.to_string();
        Ok(())
    }

    fn set_interval(&mut self, interval: &str) -> Result<(), ViewError> {
        log::info!("Interval set to {}", interval);
        self.interval = interval.to_string();
        Ok(())
    }
}

impl ControlPanel for ConsoleControls {
    fn show_bot_state(&mut self, view: &BotButtonView) -> Result<(), ViewError> {
        log::info!("🤖 Bot: {} [{}]", view.badge_text, view.label);
        Ok(())
    }

    fn show_alert(&mut self, alert: &AlertBanner) -> Result<(), ViewError> {
        log::warn!("🔔 {}: {}", alert.level, alert.message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles() -> Vec<Candle> {
        vec![
            Candle::new(1_700_000_000, 100.0, 110.0, 95.0, 105.0),
            Candle::new(1_700_003_600, 105.0, 108.0, 90.0, 98.0),
            Candle::new(1_700_007_200, 98.0, 120.0, 97.0, 110.0),
        ]
    }

    #[test]
    fn summary_counts_and_extremes() {
        let summary = SeriesSummary::from_candles(&candles()).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.bullish, 2);
        assert_eq!(summary.bearish, 1);
        assert_eq!(summary.high, 120.0);
        assert_eq!(summary.low, 90.0);
        assert!((summary.change_pct() - 10.0).abs() < 1e-9);
        assert!(SeriesSummary::from_candles(&[]).is_none());
    }

    #[test]
    fn series_data_lands_in_surface_summary() {
        let mut surface = ConsoleSurface::new(120);
        let mut chart = surface.create_chart(&ChartOptions::dark(120)).unwrap();
        let mut series = chart.add_candlestick_series(&SeriesStyle::default()).unwrap();
        series.set_data(&candles()).unwrap();
        assert_eq!(surface.summary().map(|s| s.count), Some(3));

        chart.remove();
        assert!(surface.summary().is_none());
    }

    #[test]
    fn describe_uses_quote_currency() {
        let controls = ConsoleControls::new("ETHBTC", "4h");
        let summary = SeriesSummary::from_candles(&candles()).unwrap();
        let line = controls.describe(&summary);
        assert!(line.starts_with("BINANCE:ETHBTC 4h: last 110.00 BTC"));
        assert!(line.ends_with("change 10.00%"));
    }

    #[test]
    fn describe_reports_gaps_for_known_intervals() {
        let gappy = vec![
            Candle::new(1_700_000_000, 100.0, 110.0, 95.0, 105.0),
            Candle::new(1_700_010_800, 105.0, 108.0, 90.0, 98.0),
        ];
        let summary = SeriesSummary::from_candles(&gappy).unwrap();
        assert_eq!(summary.missing_bars(3_600_000), 2);

        let line = ConsoleControls::new("ETHUSDT", "1h").describe(&summary);
        assert!(line.ends_with("| 2 missing bars"), "{}", line);
        let line = ConsoleControls::new("ETHUSDT", "7h").describe(&summary);
        assert!(!line.contains("missing"));
    }
}
