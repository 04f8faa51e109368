//! In-memory stand-ins for the DOM, the widget and the backend.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::chart::{
    CandleSeries, ChartOptions, ChartSurface, ChartWidget, ContainerView, ListenerId,
    MarketInputs, SeriesStyle, ViewError,
};
use crate::data::{
    BotClient, BotCommandResponse, BotError, BotStartRequest, BotStatus, FetchError,
    KlineFetcher, RequestToken,
};
use crate::domain::{Candle, KlineQuery};
use crate::ui::{AlertBanner, BotButtonView, ControlPanel};

/// Everything the fake surface and its charts did, shared with the test.
#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub container_width: u32,
    pub views: Vec<ContainerView>,
    pub charts_created: Vec<ChartOptions>,
    pub charts_removed: usize,
    pub series_data: Vec<Vec<Candle>>,
    pub applied_widths: Vec<u32>,
    pub active_listeners: HashSet<ListenerId>,
    next_listener: u64,
}

pub struct FakeSurface {
    log: Rc<RefCell<SurfaceLog>>,
    pub fail_create: bool,
}

impl FakeSurface {
    pub fn new(width: u32) -> Self {
        let log = SurfaceLog {
            container_width: width,
            ..Default::default()
        };
        Self {
            log: Rc::new(RefCell::new(log)),
            fail_create: false,
        }
    }

    pub fn log(&self) -> Rc<RefCell<SurfaceLog>> {
        Rc::clone(&self.log)
    }
}

pub struct FakeChart {
    log: Rc<RefCell<SurfaceLog>>,
}

pub struct FakeSeries {
    log: Rc<RefCell<SurfaceLog>>,
}

impl CandleSeries for FakeSeries {
    fn set_data(&mut self, candles: &[Candle]) -> Result<(), ViewError> {
        self.log.borrow_mut().series_data.push(candles.to_vec());
        Ok(())
    }
}

impl ChartWidget for FakeChart {
    type Series = FakeSeries;

    fn add_candlestick_series(&mut self, _style: &SeriesStyle) -> Result<FakeSeries, ViewError> {
        Ok(FakeSeries {
            log: Rc::clone(&self.log),
        })
    }

    fn apply_width(&mut self, width: u32) {
        self.log.borrow_mut().applied_widths.push(width);
    }

    fn remove(&mut self) {
        self.log.borrow_mut().charts_removed += 1;
    }
}

impl ChartSurface for FakeSurface {
    type Chart = FakeChart;

    fn container_width(&self) -> Result<u32, ViewError> {
        Ok(self.log.borrow().container_width)
    }

    fn show(&mut self, view: &ContainerView) -> Result<(), ViewError> {
        self.log.borrow_mut().views.push(view.clone());
        Ok(())
    }

    fn create_chart(&mut self, options: &ChartOptions) -> Result<FakeChart, ViewError> {
        if self.fail_create {
            return Err(ViewError::Widget(
                "LightweightCharts.createChart is not a function".to_string(),
            ));
        }
        self.log.borrow_mut().charts_created.push(options.clone());
        Ok(FakeChart {
            log: Rc::clone(&self.log),
        })
    }

    fn watch_resize(&mut self, _chart: &FakeChart) -> Result<ListenerId, ViewError> {
        let mut log = self.log.borrow_mut();
        log.next_listener += 1;
        let id = ListenerId(log.next_listener);
        log.active_listeners.insert(id);
        Ok(id)
    }

    fn unwatch_resize(&mut self, id: ListenerId) {
        self.log.borrow_mut().active_listeners.remove(&id);
    }
}

/// Symbol / interval fields plus the bot controls and alert strip.
#[derive(Debug, Default)]
pub struct FakeInputs {
    pub symbol: String,
    pub interval: String,
    pub missing_symbol: bool,
    pub bot_views: Vec<BotButtonView>,
    pub alerts: Vec<AlertBanner>,
}

impl FakeInputs {
    pub fn new(symbol: &str, interval: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            interval: interval.to_string(),
            ..Default::default()
        }
    }
}

impl MarketInputs for FakeInputs {
    fn symbol(&self) -> Result<String, ViewError> {
        if self.missing_symbol {
            return Err(ViewError::MissingElement("symbol".to_string()));
        }
        Ok(self.symbol.clone())
    }

    fn interval(&self) -> Result<String, ViewError> {
        Ok(self.interval.clone())
    }

    fn set_symbol(&mut self, symbol: &str) -> Result<(), ViewError> {
        self.symbol = symbol.to_string();
        Ok(())
    }

    fn set_interval(&mut self, interval: &str) -> Result<(), ViewError> {
        self.interval = interval.to_string();
        Ok(())
    }
}

impl ControlPanel for FakeInputs {
    fn show_bot_state(&mut self, view: &BotButtonView) -> Result<(), ViewError> {
        self.bot_views.push(view.clone());
        Ok(())
    }

    fn show_alert(&mut self, alert: &AlertBanner) -> Result<(), ViewError> {
        self.alerts.push(alert.clone());
        Ok(())
    }
}

/// Answers every request with the same canned result.
pub struct FakeFetcher {
    result: Result<Vec<Candle>, FetchError>,
    queries: RefCell<Vec<KlineQuery>>,
}

impl FakeFetcher {
    pub fn returning(result: Result<Vec<Candle>, FetchError>) -> Self {
        Self {
            result,
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<KlineQuery> {
        self.queries.borrow().clone()
    }
}

#[async_trait(?Send)]
impl KlineFetcher for FakeFetcher {
    async fn fetch_candles(
        &self,
        query: &KlineQuery,
        _token: RequestToken,
    ) -> Result<Vec<Candle>, FetchError> {
        self.queries.borrow_mut().push(query.clone());
        self.result.clone()
    }

    fn signature(&self) -> &'static str {
        "Fake canned klines"
    }
}

/// Holds every request open until the test releases it, keyed by symbol.
#[derive(Default)]
pub struct GatedFetcher {
    pending: RefCell<HashMap<String, oneshot::Sender<Result<Vec<Candle>, FetchError>>>>,
}

impl GatedFetcher {
    pub fn is_waiting(&self, symbol: &str) -> bool {
        self.pending.borrow().contains_key(symbol)
    }

    pub fn release(&self, symbol: &str, result: Result<Vec<Candle>, FetchError>) {
        let sender = self
            .pending
            .borrow_mut()
            .remove(symbol)
            .expect("no request pending for symbol");
        let _ = sender.send(result);
    }
}

#[async_trait(?Send)]
impl KlineFetcher for GatedFetcher {
    async fn fetch_candles(
        &self,
        query: &KlineQuery,
        _token: RequestToken,
    ) -> Result<Vec<Candle>, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().insert(query.symbol.clone(), tx);
        rx.await
            .unwrap_or_else(|_| Err(FetchError::Transport("request dropped".to_string())))
    }

    fn signature(&self) -> &'static str {
        "Fake gated klines"
    }
}

/// Scripted bot backend. Unscripted calls fail as if the server were down.
#[derive(Default)]
pub struct FakeBot {
    start: Option<Result<BotCommandResponse, BotError>>,
    stop: Option<Result<BotCommandResponse, BotError>>,
    status: Option<Result<BotStatus, BotError>>,
    calls: RefCell<Vec<&'static str>>,
    start_requests: RefCell<Vec<BotStartRequest>>,
}

impl FakeBot {
    pub fn with_start(mut self, reply: Result<BotCommandResponse, BotError>) -> Self {
        self.start = Some(reply);
        self
    }

    pub fn with_stop(mut self, reply: Result<BotCommandResponse, BotError>) -> Self {
        self.stop = Some(reply);
        self
    }

    pub fn with_status(mut self, reply: Result<BotStatus, BotError>) -> Self {
        self.status = Some(reply);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn start_requests(&self) -> Vec<BotStartRequest> {
        self.start_requests.borrow().clone()
    }

    fn unscripted<T>() -> Result<T, BotError> {
        Err(BotError::Transport("connection refused".to_string()))
    }
}

#[async_trait(?Send)]
impl BotClient for FakeBot {
    async fn start_bot(&self, request: &BotStartRequest) -> Result<BotCommandResponse, BotError> {
        self.calls.borrow_mut().push("start");
        self.start_requests.borrow_mut().push(request.clone());
        self.start.clone().unwrap_or_else(Self::unscripted)
    }

    async fn stop_bot(&self) -> Result<BotCommandResponse, BotError> {
        self.calls.borrow_mut().push("stop");
        self.stop.clone().unwrap_or_else(Self::unscripted)
    }

    async fn bot_status(&self) -> Result<BotStatus, BotError> {
        self.calls.borrow_mut().push("status");
        self.status.clone().unwrap_or_else(Self::unscripted)
    }
}
