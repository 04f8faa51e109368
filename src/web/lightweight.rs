//! The `LightweightCharts` global, loaded by the page before the wasm bundle.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::chart::ViewError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = LightweightCharts, js_name = createChart, catch)]
    pub fn create_chart(container: &web_sys::Element, options: &JsValue) -> Result<JsChart, JsValue>;

    #[derive(Clone)]
    pub type JsChart;

    #[wasm_bindgen(method, js_name = addCandlestickSeries, catch)]
    pub fn add_candlestick_series(this: &JsChart, options: &JsValue) -> Result<JsSeries, JsValue>;

    #[wasm_bindgen(method, js_name = applyOptions)]
    pub fn apply_options(this: &JsChart, options: &JsValue);

    #[wasm_bindgen(method)]
    pub fn remove(this: &JsChart);

    pub type JsSeries;

    #[wasm_bindgen(method, js_name = setData, catch)]
    pub fn set_data(this: &JsSeries, data: &JsValue) -> Result<(), JsValue>;
}

/// Plain JS object from anything serde can write (goes through JSON, the shapes are tiny).
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, ViewError> {
    let json = serde_json::to_string(value).map_err(|e| ViewError::Widget(e.to_string()))?;
    js_sys::JSON::parse(&json).map_err(|e| ViewError::Widget(js_error_message(&e)))
}

/// `error.message` for thrown Errors, the value itself for thrown strings.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}
