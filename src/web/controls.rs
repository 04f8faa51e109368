use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::chart::{MarketInputs, ViewError};
use crate::config::DOM_IDS;
use crate::ui::markup::{alert_html, bot_button_html};
use crate::ui::{AlertBanner, BotButtonView, ControlPanel};
use crate::web::lightweight::js_error_message;

/// Symbol / interval inputs, the bot button and badge, and the alert strip.
pub struct DomControls {
    document: Document,
}

impl DomControls {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Result<Element, ViewError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }

    // `value` lives on several element types (input, select), so go through Reflect.
    fn value(&self, id: &str) -> Result<String, ViewError> {
        let element = self.element(id)?;
        let value = js_sys::Reflect::get(&element, &JsValue::from_str("value"))
            .map_err(|e| ViewError::Widget(js_error_message(&e)))?;
        Ok(value.as_string().unwrap_or_default())
    }

    fn set_value(&self, id: &str, value: &str) -> Result<(), ViewError> {
        let element = self.element(id)?;
        js_sys::Reflect::set(&element, &JsValue::from_str("value"), &JsValue::from_str(value))
            .map_err(|e| ViewError::Widget(js_error_message(&e)))?;
        Ok(())
    }

    fn swap_class(element: &Element, stale: &str, current: &str) -> Result<(), ViewError> {
        let classes = element.class_list();
        classes
            .remove_1(stale)
            .and_then(|_| classes.add_1(current))
            .map_err(|e| ViewError::Widget(js_error_message(&e)))
    }

    // No #alerts on the page: put one at the top of the main container.
    fn alerts_container(&self) -> Result<Element, ViewError> {
        if let Ok(alerts) = self.element(DOM_IDS.alerts) {
            return Ok(alerts);
        }
        let parent = self
            .document
            .query_selector(DOM_IDS.alerts_fallback_parent)
            .ok()
            .flatten()
            .ok_or_else(|| ViewError::MissingElement(DOM_IDS.alerts.to_string()))?;
        let alerts = self
            .document
            .create_element("div")
            .map_err(|e| ViewError::Widget(js_error_message(&e)))?;
        alerts.set_id(DOM_IDS.alerts);
        parent
            .prepend_with_node_1(&alerts)
            .map_err(|e| ViewError::Widget(js_error_message(&e)))?;
        Ok(alerts)
    }
}

impl MarketInputs for DomControls {
    fn symbol(&self) -> Result<String, ViewError> {
        self.value(DOM_IDS.symbol_input)
    }

    fn interval(&self) -> Result<String, ViewError> {
        self.value(DOM_IDS.interval_input)
    }

    fn set_symbol(&mut self, symbol: &str) -> Result<(), ViewError> {
        self.set_value(DOM_IDS.symbol_input, symbol)
    }

    fn set_interval(&mut self, interval: &str) -> Result<(), ViewError> {
        self.set_value(DOM_IDS.interval_input, interval)
    }
}

impl ControlPanel for DomControls {
    fn show_bot_state(&mut self, view: &BotButtonView) -> Result<(), ViewError> {
        let button = self.element(DOM_IDS.bot_button)?;
        Self::swap_class(&button, view.stale_button_class, view.button_class)?;
        button.set_inner_html(&bot_button_html(view));

        let badge = self.element(DOM_IDS.bot_badge)?;
        Self::swap_class(&badge, view.stale_badge_class, view.badge_class)?;
        badge.set_text_content(Some(view.badge_text));
        Ok(())
    }

    fn show_alert(&mut self, alert: &AlertBanner) -> Result<(), ViewError> {
        self.alerts_container()?.set_inner_html(&alert_html(alert));
        Ok(())
    }
}
