use crate::chart::options::{ChartOptions, SeriesStyle};
use crate::chart::surface::{
    CandleSeries, ChartSurface, ChartWidget, ContainerView, ErrorPanel, ListenerId, MarketInputs,
    ViewError,
};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::UI_TEXT;
use crate::data::{FetchError, KlineFetcher, RequestToken, TokenIssuer};
use crate::domain::candle::is_strictly_ascending;
use crate::domain::{Candle, KlineQuery, MarketSelection};

/// The one chart instance and the one candlestick series living inside it.
pub struct ChartHandle<C: ChartWidget> {
    pub chart: C,
    pub series: C::Series,
}

/// Issued when a render starts; the fetch result is only applied if this is still the newest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    pub selection: MarketSelection,
    pub token: RequestToken,
}

impl RenderTicket {
    pub fn query(&self) -> &KlineQuery {
        &self.selection.query
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered { query: KlineQuery, candles: usize },
    Failed { panel: ErrorPanel },
    /// A newer render started while this one was fetching; its result was dropped
    Stale { token: RequestToken },
}

/// Owns the chart / series pair exclusively and replaces it wholesale on every render.
pub struct ChartAdapter<S: ChartSurface> {
    surface: S,
    handle: Option<ChartHandle<S::Chart>>,
    resize_listener: Option<ListenerId>,
    tokens: TokenIssuer,
    series_style: SeriesStyle,
}

impl<S: ChartSurface> ChartAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            handle: None,
            resize_listener: None,
            tokens: TokenIssuer::default(),
            series_style: SeriesStyle::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn has_chart(&self) -> bool {
        self.handle.is_some()
    }

    pub fn resize_listener(&self) -> Option<ListenerId> {
        self.resize_listener
    }

    /// Fetch and render in one go. Fine when nothing else can start a render meanwhile;
    /// otherwise drive `begin_render` / `complete_render` separately.
    pub async fn render<I, F>(&mut self, inputs: &mut I, fetcher: &F) -> RenderOutcome
    where
        I: MarketInputs + ?Sized,
        F: KlineFetcher + ?Sized,
    {
        let ticket = match self.begin_render(inputs) {
            Ok(ticket) => ticket,
            Err(panel) => return RenderOutcome::Failed { panel },
        };
        let result = fetcher.fetch_candles(ticket.query(), ticket.token).await;
        self.complete_render(&ticket, result)
    }

    /// Synchronous half of a render: read and repair the inputs, swap in a fresh chart
    /// behind a loading indicator, and hand back the ticket for the fetch.
    ///
    /// On failure the error panel is already showing.
    pub fn begin_render<I>(&mut self, inputs: &mut I) -> Result<RenderTicket, ErrorPanel>
    where
        I: MarketInputs + ?Sized,
    {
        // Issue first so any fetch still in flight is stale, even if we fail below
        let token = self.tokens.issue();

        match self.try_begin(inputs, token) {
            Ok(selection) => {
                log::info!("📈 Chart loading: {} ({})", selection.query, token);
                Ok(RenderTicket { selection, token })
            }
            Err(e) => {
                log::error!("Chart error: {}", e);
                Err(self.fail(UI_TEXT.chart_failed_title, e.to_string()))
            }
        }
    }

    fn try_begin<I>(&mut self, inputs: &mut I, _token: RequestToken) -> Result<MarketSelection, ViewError>
    where
        I: MarketInputs + ?Sized,
    {
        self.teardown();
        self.surface.show(&ContainerView::Empty)?;

        let selection = MarketSelection::from_inputs(&inputs.symbol()?, &inputs.interval()?);
        if selection.symbol_substituted {
            inputs.set_symbol(selection.symbol())?;
        }
        if selection.interval_substituted {
            inputs.set_interval(selection.interval())?;
        }

        self.surface.show(&ContainerView::loading())?;

        let width = self.surface.container_width()?;
        let mut chart = self.surface.create_chart(&ChartOptions::dark(width))?;
        let series = match chart.add_candlestick_series(&self.series_style) {
            Ok(series) => series,
            Err(e) => {
                chart.remove();
                return Err(e);
            }
        };

        let listener = match self.surface.watch_resize(&chart) {
            Ok(listener) => listener,
            Err(e) => {
                chart.remove();
                return Err(e);
            }
        };
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_resize_listeners {
            log::info!("Resize listener {:?} registered for {}", listener, _token);
        }

        self.resize_listener = Some(listener);
        self.handle = Some(ChartHandle { chart, series });
        Ok(selection)
    }

    /// Asynchronous half's landing point. Results for anything but the newest ticket are dropped.
    pub fn complete_render(
        &mut self,
        ticket: &RenderTicket,
        result: Result<Vec<Candle>, FetchError>,
    ) -> RenderOutcome {
        if !self.tokens.is_current(ticket.token) {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_stale_discards {
                log::info!(
                    "Dropping stale result for {} ({}), newest is {:?}",
                    ticket.query(),
                    ticket.token,
                    self.tokens.latest()
                );
            }
            return RenderOutcome::Stale {
                token: ticket.token,
            };
        }

        let candles = match result {
            Ok(candles) => candles,
            Err(e) => {
                log::error!("Error while fetching candle data for {}: {}", ticket.query(), e);
                return RenderOutcome::Failed {
                    panel: self.fail(UI_TEXT.data_failed_title, e.to_string()),
                };
            }
        };

        match self.apply_candles(&candles) {
            Ok(()) => {
                log::info!(
                    "✅ Rendered {} candles for {}",
                    candles.len(),
                    ticket.query()
                );
                RenderOutcome::Rendered {
                    query: ticket.query().clone(),
                    candles: candles.len(),
                }
            }
            Err(e) => {
                log::error!("Could not render candles for {}: {}", ticket.query(), e);
                RenderOutcome::Failed {
                    panel: self.fail(UI_TEXT.data_failed_title, e.to_string()),
                }
            }
        }
    }

    fn apply_candles(&mut self, candles: &[Candle]) -> Result<(), ViewError> {
        let handle = self
            .handle
            .as_mut()
            .ok_or_else(|| ViewError::Widget("chart is not initialised".to_string()))?;

        if candles.is_empty() {
            log::warn!("Backend returned no candles");
        } else if !is_strictly_ascending(candles) {
            // The widget will complain; the backend is trusted to sort, so just make it visible
            log::warn!("Candles are not strictly ascending by time");
        }

        handle.series.set_data(candles)?;
        self.surface.show(&ContainerView::Chart)
    }

    /// Re-apply the container's current width. Wired to the window resize event.
    pub fn on_resize(&mut self) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        match self.surface.container_width() {
            Ok(width) => handle.chart.apply_width(width),
            Err(e) => log::warn!("Resize skipped: {}", e),
        }
    }

    // Replace everything in the container with the error panel, dropping the chart.
    fn fail(&mut self, title: &str, detail: String) -> ErrorPanel {
        self.teardown();
        let panel = ErrorPanel::new(title, detail);
        if let Err(e) = self.surface.show(&ContainerView::Error(panel.clone())) {
            log::error!("Could not even show the error panel: {}", e);
        }
        panel
    }

    fn teardown(&mut self) {
        if let Some(listener) = self.resize_listener.take() {
            self.surface.unwatch_resize(listener);
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_resize_listeners {
                log::info!("Resize listener {:?} removed", listener);
            }
        }
        if let Some(mut handle) = self.handle.take() {
            handle.chart.remove();
        }
    }
}

impl<S: ChartSurface> Drop for ChartAdapter<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeFetcher, FakeInputs, FakeSurface};

    fn sample_rows() -> Vec<Candle> {
        vec![
            Candle::new(1_700_000_000, 100.0, 110.0, 95.0, 105.0),
            Candle::new(1_700_003_600, 105.0, 108.0, 101.0, 102.0),
        ]
    }

    #[tokio::test]
    async fn renders_fetched_candles_into_the_series() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");
        let fetcher = FakeFetcher::returning(Ok(sample_rows()));

        let outcome = adapter.render(&mut inputs, &fetcher).await;

        assert_eq!(
            outcome,
            RenderOutcome::Rendered {
                query: KlineQuery::new("ETHUSDT", "1h"),
                candles: 2
            }
        );
        assert_eq!(fetcher.queries(), vec![KlineQuery::new("ETHUSDT", "1h")]);
        let log = log.borrow();
        assert_eq!(log.series_data, vec![sample_rows()]);
        assert_eq!(
            log.views,
            vec![ContainerView::Empty, ContainerView::loading(), ContainerView::Chart]
        );
        assert_eq!(log.charts_created[0].width, 800);
        assert_eq!(log.active_listeners.len(), 1);
    }

    #[tokio::test]
    async fn junk_symbol_is_replaced_and_written_back() {
        for junk in ["", "undefined", "null"] {
            let mut adapter = ChartAdapter::new(FakeSurface::new(640));
            let mut inputs = FakeInputs::new(junk, "1h");
            let fetcher = FakeFetcher::returning(Ok(Vec::new()));

            adapter.render(&mut inputs, &fetcher).await;

            assert_eq!(inputs.symbol, "BTCUSDT");
            assert_eq!(fetcher.queries()[0].symbol, "BTCUSDT");
        }
    }

    #[tokio::test]
    async fn junk_interval_is_replaced_and_written_back() {
        for junk in ["", "undefined", "null"] {
            let mut adapter = ChartAdapter::new(FakeSurface::new(640));
            let mut inputs = FakeInputs::new("ETHUSDT", junk);
            let fetcher = FakeFetcher::returning(Ok(Vec::new()));

            adapter.render(&mut inputs, &fetcher).await;

            assert_eq!(inputs.interval, "1h", "input {:?}", junk);
            assert_eq!(inputs.symbol, "ETHUSDT");
            assert_eq!(fetcher.queries(), vec![KlineQuery::new("ETHUSDT", "1h")]);
        }
    }

    #[tokio::test]
    async fn padded_inputs_are_sent_trimmed() {
        let mut adapter = ChartAdapter::new(FakeSurface::new(640));
        let mut inputs = FakeInputs::new(" ETHUSDT ", " 4h");
        let fetcher = FakeFetcher::returning(Ok(Vec::new()));

        adapter.render(&mut inputs, &fetcher).await;

        assert_eq!(fetcher.queries(), vec![KlineQuery::new("ETHUSDT", "4h")]);
        // Only junk is written back; the field keeps what the user typed
        assert_eq!(inputs.symbol, " ETHUSDT ");
    }

    #[tokio::test]
    async fn http_failure_shows_panel_and_never_sets_data() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");
        let fetcher = FakeFetcher::returning(Err(FetchError::Status {
            status: 500,
            message: None,
        }));

        let outcome = adapter.render(&mut inputs, &fetcher).await;

        let RenderOutcome::Failed { panel } = outcome else {
            panic!("expected failure, got {:?}", outcome);
        };
        assert_eq!(panel.title, UI_TEXT.data_failed_title);
        assert!(panel.detail.contains("500"));
        let log = log.borrow();
        assert!(log.series_data.is_empty());
        assert_eq!(log.views.last(), Some(&ContainerView::Error(panel)));
        assert!(log.active_listeners.is_empty());
        assert!(!adapter.has_chart());
    }

    #[tokio::test]
    async fn backend_error_message_reaches_the_panel() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");
        let fetcher = FakeFetcher::returning(Err(FetchError::Backend("X".to_string())));

        adapter.render(&mut inputs, &fetcher).await;

        match log.borrow().views.last() {
            Some(ContainerView::Error(panel)) => assert!(panel.detail.contains('X')),
            other => panic!("expected error panel, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rendering_twice_keeps_one_listener_and_same_end_state() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");
        let fetcher = FakeFetcher::returning(Ok(sample_rows()));

        adapter.render(&mut inputs, &fetcher).await;
        let first_views = log.borrow().views.clone();
        log.borrow_mut().views.clear();
        adapter.render(&mut inputs, &fetcher).await;

        let log = log.borrow();
        assert_eq!(log.views, first_views);
        assert_eq!(log.active_listeners.len(), 1);
        assert_eq!(log.charts_created.len(), 2);
        assert_eq!(log.charts_removed, 1);
    }

    #[test]
    fn stale_result_is_dropped() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");

        let old = adapter.begin_render(&mut inputs).unwrap();
        inputs.symbol = "SOLUSDT".to_string();
        let new = adapter.begin_render(&mut inputs).unwrap();

        // Fresh response lands first, then the slow one for the old symbol
        let fresh = adapter.complete_render(&new, Ok(sample_rows()));
        let late = adapter.complete_render(&old, Ok(vec![Candle::new(1, 1.0, 1.0, 1.0, 1.0)]));

        assert!(matches!(fresh, RenderOutcome::Rendered { candles: 2, .. }));
        assert_eq!(late, RenderOutcome::Stale { token: old.token });
        assert_eq!(log.borrow().series_data, vec![sample_rows()]);
    }

    #[test]
    fn stale_failure_does_not_wipe_the_newer_chart() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");

        let old = adapter.begin_render(&mut inputs).unwrap();
        let _new = adapter.begin_render(&mut inputs).unwrap();
        let outcome = adapter.complete_render(&old, Err(FetchError::Timeout(Default::default())));

        assert!(matches!(outcome, RenderOutcome::Stale { .. }));
        assert!(adapter.has_chart());
        assert_eq!(log.borrow().views.last(), Some(&ContainerView::loading()));
    }

    #[test]
    fn missing_input_element_shows_chart_failure_panel() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");
        inputs.missing_symbol = true;

        let panel = adapter.begin_render(&mut inputs).unwrap_err();

        assert_eq!(panel.title, UI_TEXT.chart_failed_title);
        assert!(panel.detail.contains("symbol"));
        assert!(log.borrow().charts_created.is_empty());
        assert!(!adapter.has_chart());
    }

    #[test]
    fn widget_failure_cleans_up_and_reports() {
        let mut surface = FakeSurface::new(800);
        surface.fail_create = true;
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");

        let panel = adapter.begin_render(&mut inputs).unwrap_err();

        assert!(panel.detail.contains("createChart"));
        assert!(log.borrow().active_listeners.is_empty());
        assert!(matches!(log.borrow().views.last(), Some(ContainerView::Error(_))));
    }

    #[test]
    fn resize_applies_current_container_width() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        let mut inputs = FakeInputs::new("ETHUSDT", "1h");
        adapter.begin_render(&mut inputs).unwrap();

        log.borrow_mut().container_width = 1024;
        adapter.on_resize();

        assert_eq!(log.borrow().applied_widths, vec![1024]);
    }

    #[test]
    fn dropping_the_adapter_releases_the_listener() {
        let surface = FakeSurface::new(800);
        let log = surface.log();
        let mut adapter = ChartAdapter::new(surface);
        adapter
            .begin_render(&mut FakeInputs::new("ETHUSDT", "1h"))
            .unwrap();
        assert_eq!(log.borrow().active_listeners.len(), 1);

        drop(adapter);

        assert!(log.borrow().active_listeners.is_empty());
        assert_eq!(log.borrow().charts_removed, 1);
    }
}
