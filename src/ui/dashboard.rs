use std::cell::{Cell, Ref, RefCell, RefMut};

use thiserror::Error;

use crate::chart::{ChartAdapter, ChartSurface, MarketInputs, RenderOutcome, ViewError};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::DEFAULTS;
use crate::data::{BotClient, BotError, BotStartRequest, KlineFetcher};
use crate::domain::MarketSelection;
use crate::ui::alerts::AlertBanner;
use crate::ui::bot_control::{BotButtonView, BotState};

/// What a bot-control event can fail with. Chart failures never get here, they end up
/// in the container as an error panel.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashError {
    #[error(transparent)]
    Bot(#[from] BotError),
    #[error(transparent)]
    View(#[from] ViewError),
    /// The backend answered but said no (`success: false`)
    #[error("{0}")]
    Rejected(String),
}

/// Form controls beyond the chart container: market inputs, bot button and badge, alert strip.
pub trait ControlPanel: MarketInputs {
    fn show_bot_state(&mut self, view: &BotButtonView) -> Result<(), ViewError>;
    fn show_alert(&mut self, alert: &AlertBanner) -> Result<(), ViewError>;
}

/// Wires page events to the chart adapter and the bot client.
///
/// Every handler takes `&self` and only borrows the cells between awaits, so handlers for
/// overlapping events can run interleaved on the one event loop.
pub struct Dashboard<S, P, F, B>
where
    S: ChartSurface,
    P: ControlPanel,
    F: KlineFetcher,
    B: BotClient,
{
    chart: RefCell<ChartAdapter<S>>,
    panel: RefCell<P>,
    fetcher: F,
    bot: B,
    bot_state: Cell<BotState>,
}

impl<S, P, F, B> Dashboard<S, P, F, B>
where
    S: ChartSurface,
    P: ControlPanel,
    F: KlineFetcher,
    B: BotClient,
{
    pub fn new(surface: S, panel: P, fetcher: F, bot: B) -> Self {
        log::info!("🧩 Dashboard using {}", fetcher.signature());
        Self {
            chart: RefCell::new(ChartAdapter::new(surface)),
            panel: RefCell::new(panel),
            fetcher,
            bot,
            bot_state: Cell::new(BotState::default()),
        }
    }

    pub fn bot_state(&self) -> BotState {
        self.bot_state.get()
    }

    pub fn chart(&self) -> Ref<'_, ChartAdapter<S>> {
        self.chart.borrow()
    }

    pub fn panel(&self) -> Ref<'_, P> {
        self.panel.borrow()
    }

    pub fn panel_mut(&self) -> RefMut<'_, P> {
        self.panel.borrow_mut()
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// First render plus picking up whatever the backend says the bot is doing.
    pub async fn page_loaded(&self) -> RenderOutcome {
        let (outcome, status) = futures::join!(self.refresh_chart(), self.sync_bot_status());
        if let Err(e) = status {
            log::warn!("Could not read bot status: {}", e);
        }
        outcome
    }

    pub async fn refresh_chart(&self) -> RenderOutcome {
        let ticket = {
            let mut chart = self.chart.borrow_mut();
            let mut panel = self.panel.borrow_mut();
            chart.begin_render(&mut *panel)
        };
        let ticket = match ticket {
            Ok(ticket) => ticket,
            Err(panel) => return RenderOutcome::Failed { panel },
        };

        let result = self.fetcher.fetch_candles(ticket.query(), ticket.token).await;

        self.chart.borrow_mut().complete_render(&ticket, result)
    }

    /// Symbol or interval changed: redraw and, independently, ask the bot to stop.
    pub async fn on_market_change(&self) -> RenderOutcome {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("🖱️ Market selection changed");
        }
        let (outcome, _) = futures::join!(self.refresh_chart(), self.stop_bot_on_market_change());
        outcome
    }

    /// Only an explicit `success` moves the button to Stopped; anything else is just logged,
    /// so the button can disagree with the backend after a failed stop.
    pub async fn stop_bot_on_market_change(&self) -> BotState {
        let reply = self.bot.stop_bot().await;
        match &reply {
            Ok(response) if !response.success => {
                log::warn!("Bot could not be stopped: {}", response.failure_reason())
            }
            Err(e) => log::error!("Error while stopping bot: {}", e),
            Ok(_) => {}
        }
        let next = self.bot_state.get().after_stop(&reply);
        self.set_bot_state(next);
        next
    }

    /// The start / stop toggle. Failures end up in the alert strip as well as the result.
    pub async fn on_bot_button(&self) -> Result<BotState, DashError> {
        let current = self.bot_state.get();
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("🖱️ Bot button clicked while {}", current);
        }

        let reply = match current {
            BotState::Stopped => {
                let request = match self.start_request() {
                    Ok(request) => request,
                    Err(e) => {
                        self.alert(&AlertBanner::danger(e.to_string()));
                        return Err(e.into());
                    }
                };
                self.bot.start_bot(&request).await
            }
            BotState::Running => self.bot.stop_bot().await,
        };

        let next = match current {
            BotState::Stopped => current.after_start(&reply),
            BotState::Running => current.after_stop(&reply),
        };
        self.set_bot_state(next);

        match reply {
            Ok(response) if response.success => Ok(next),
            Ok(response) => {
                self.alert(&AlertBanner::from_rejected_command(&response));
                Err(DashError::Rejected(response.failure_reason().to_string()))
            }
            Err(e) => {
                self.alert(&AlertBanner::from_bot_error(&e));
                Err(e.into())
            }
        }
    }

    pub async fn sync_bot_status(&self) -> Result<BotState, DashError> {
        let status = self.bot.bot_status().await?;
        let state = BotState::from_status(&status);
        if let (BotState::Running, Some(symbol)) = (state, status.symbol.as_deref()) {
            log::info!(
                "🤖 Bot already running on {} {}",
                symbol,
                status.interval.as_deref().unwrap_or("?")
            );
        }
        self.set_bot_state(state);
        Ok(state)
    }

    pub fn on_resize(&self) {
        self.chart.borrow_mut().on_resize();
    }

    // The bot trades whatever the inputs currently say, junk replaced but not written back.
    fn start_request(&self) -> Result<BotStartRequest, ViewError> {
        let panel = self.panel.borrow();
        let selection = MarketSelection::from_inputs(&panel.symbol()?, &panel.interval()?);
        Ok(BotStartRequest {
            symbol: selection.symbol().to_string(),
            interval: selection.interval().to_string(),
            strategy: DEFAULTS.strategy.to_string(),
        })
    }

    fn set_bot_state(&self, next: BotState) {
        let _previous = self.bot_state.replace(next);
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_bot_transitions {
            log::info!("Bot state {} -> {}", _previous, next);
        }
        if let Err(e) = self.panel.borrow_mut().show_bot_state(&next.view()) {
            log::error!("Could not update bot controls: {}", e);
        }
    }

    fn alert(&self, alert: &AlertBanner) {
        if let Err(e) = self.panel.borrow_mut().show_alert(alert) {
            log::error!("Could not show alert '{}': {}", alert.message, e);
        }
    }
}
