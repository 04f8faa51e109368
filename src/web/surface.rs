use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Window};

use crate::chart::options::WidthUpdate;
use crate::chart::{
    CandleSeries, ChartOptions, ChartSurface, ChartWidget, ContainerView, ListenerId, SeriesStyle,
    ViewError,
};
use crate::config::DOM_IDS;
use crate::domain::Candle;
use crate::ui::markup::container_html;
use crate::web::lightweight::{self, JsChart, JsSeries, js_error_message, to_js};

/// The chart container element and the window resize listeners registered for it.
pub struct DomSurface {
    window: Window,
    document: Document,
    listeners: HashMap<ListenerId, Closure<dyn FnMut()>>,
    next_listener: u64,
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            listeners: HashMap::new(),
            next_listener: 0,
        }
    }

    fn container(&self) -> Result<Element, ViewError> {
        container_element(&self.document)
    }
}

fn container_element(document: &Document) -> Result<Element, ViewError> {
    document
        .get_element_by_id(DOM_IDS.chart_container)
        .ok_or_else(|| ViewError::MissingElement(DOM_IDS.chart_container.to_string()))
}

fn width_of(element: &Element) -> u32 {
    element.client_width().max(0) as u32
}

pub struct DomChart {
    chart: JsChart,
}

pub struct DomSeries {
    series: JsSeries,
}

impl CandleSeries for DomSeries {
    fn set_data(&mut self, candles: &[Candle]) -> Result<(), ViewError> {
        let data = to_js(candles)?;
        self.series
            .set_data(&data)
            .map_err(|e| ViewError::Widget(js_error_message(&e)))
    }
}

impl ChartWidget for DomChart {
    type Series = DomSeries;

    fn add_candlestick_series(&mut self, style: &SeriesStyle) -> Result<DomSeries, ViewError> {
        let options = to_js(style)?;
        let series = self
            .chart
            .add_candlestick_series(&options)
            .map_err(|e| ViewError::Widget(js_error_message(&e)))?;
        Ok(DomSeries { series })
    }

    fn apply_width(&mut self, width: u32) {
        match to_js(&WidthUpdate { width }) {
            Ok(options) => self.chart.apply_options(&options),
            Err(e) => log::warn!("Could not resize chart: {}", e),
        }
    }

    fn remove(&mut self) {
        self.chart.remove();
    }
}

impl ChartSurface for DomSurface {
    type Chart = DomChart;

    fn container_width(&self) -> Result<u32, ViewError> {
        Ok(width_of(&self.container()?))
    }

    fn show(&mut self, view: &ContainerView) -> Result<(), ViewError> {
        let container = self.container()?;
        match view {
            // The widget already sits in the container; only the spinner has to go
            ContainerView::Chart => {
                if let Some(overlay) = self.document.get_element_by_id(DOM_IDS.loading_overlay) {
                    overlay.remove();
                }
            }
            other => container.set_inner_html(&container_html(other)),
        }
        Ok(())
    }

    fn create_chart(&mut self, options: &ChartOptions) -> Result<DomChart, ViewError> {
        let container = self.container()?;
        let options = to_js(options)?;
        let chart = lightweight::create_chart(&container, &options)
            .map_err(|e| ViewError::Widget(format!("createChart: {}", js_error_message(&e))))?;
        Ok(DomChart { chart })
    }

    fn watch_resize(&mut self, chart: &DomChart) -> Result<ListenerId, ViewError> {
        let chart = chart.chart.clone();
        let document = self.document.clone();
        let callback = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let Ok(container) = container_element(&document) else {
                return;
            };
            if let Ok(options) = to_js(&WidthUpdate {
                width: width_of(&container),
            }) {
                chart.apply_options(&options);
            }
        }));

        self.window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            .map_err(|e| ViewError::Widget(js_error_message(&e)))?;

        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.insert(id, callback);
        Ok(id)
    }

    fn unwatch_resize(&mut self, id: ListenerId) {
        let Some(callback) = self.listeners.remove(&id) else {
            return;
        };
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
        {
            log::warn!("Could not remove resize listener: {}", js_error_message(&e));
        }
    }
}
