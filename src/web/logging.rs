use log::LevelFilter;
use wasm_bindgen::JsValue;

/// `log` records to the browser console, errors and warnings on their own channels.
pub fn init() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(fern::Output::call(|record| {
            let line = JsValue::from_str(&record.args().to_string());
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&line),
                log::Level::Warn => web_sys::console::warn_1(&line),
                _ => web_sys::console::log_1(&line),
            }
        }))
        .apply();

    if let Err(e) = result {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger already set: {e}")));
    }
}
