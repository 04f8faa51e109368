use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, Window};

use crate::config::{ApiConfig, DOM_IDS};
use crate::data::{HttpBotClient, HttpKlineFetcher};
use crate::ui::Dashboard;
use crate::web::controls::DomControls;
use crate::web::logging;
use crate::web::surface::DomSurface;

type BrowserDashboard = Dashboard<DomSurface, DomControls, HttpKlineFetcher, HttpBotClient>;

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    log::info!("🚀 kline-dash loaded");
}

/// Page-side handle. Each handler returns immediately; the work runs on the event loop.
#[wasm_bindgen]
pub struct WebDashboard {
    inner: Rc<BrowserDashboard>,
    document: Document,
}

#[wasm_bindgen]
impl WebDashboard {
    /// Talks to the backend the page was served from.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebDashboard, JsValue> {
        let window: Window = web_sys::window().ok_or("no global `window` exists")?;
        let document = window.document().ok_or("window has no document")?;
        let origin = window.location().origin()?;

        let config = ApiConfig::default().with_base_url(origin);
        let fetcher = HttpKlineFetcher::new(config.clone()).map_err(to_js_error)?;
        let bot = HttpBotClient::new(config).map_err(to_js_error)?;

        let dashboard = Dashboard::new(
            DomSurface::new(window, document.clone()),
            DomControls::new(document.clone()),
            fetcher,
            bot,
        );
        Ok(WebDashboard {
            inner: Rc::new(dashboard),
            document,
        })
    }

    /// Hook up the selectors and the bot button, then draw the first chart.
    pub fn init(&self) -> Result<(), JsValue> {
        self.listen(DOM_IDS.symbol_input, "change", |dash| {
            spawn_local(async move {
                dash.on_market_change().await;
            })
        })?;
        self.listen(DOM_IDS.interval_input, "change", |dash| {
            spawn_local(async move {
                dash.on_market_change().await;
            })
        })?;
        self.listen(DOM_IDS.bot_button, "click", |dash| {
            spawn_local(async move {
                if let Err(e) = dash.on_bot_button().await {
                    log::warn!("Bot button: {}", e);
                }
            })
        })?;

        let dash = Rc::clone(&self.inner);
        spawn_local(async move {
            dash.page_loaded().await;
        });
        Ok(())
    }

    pub fn on_symbol_change(&self) {
        self.market_change();
    }

    pub fn on_interval_change(&self) {
        self.market_change();
    }

    pub fn on_bot_button_click(&self) {
        let dash = Rc::clone(&self.inner);
        spawn_local(async move {
            if let Err(e) = dash.on_bot_button().await {
                log::warn!("Bot button: {}", e);
            }
        });
    }

    pub fn on_resize(&self) {
        self.inner.on_resize();
    }
}

impl WebDashboard {
    fn market_change(&self) {
        let dash = Rc::clone(&self.inner);
        spawn_local(async move {
            dash.on_market_change().await;
        });
    }

    // Listeners live as long as the page, so the closures are leaked on purpose.
    fn listen<H>(&self, id: &str, event: &str, handler: H) -> Result<(), JsValue>
    where
        H: Fn(Rc<BrowserDashboard>) + 'static,
    {
        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("element #{id} not found")))?;
        let dash = Rc::clone(&self.inner);
        let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| {
            handler(Rc::clone(&dash))
        }));
        element.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        callback.forget();
        Ok(())
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
