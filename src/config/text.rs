//! User-facing strings.

pub struct UiText {
    pub loading: &'static str,
    pub chart_failed_title: &'static str,
    pub data_failed_title: &'static str,
    pub failure_hint: &'static str,
    pub unknown_error: &'static str,
    pub start_bot: &'static str,
    pub stop_bot: &'static str,
    pub badge_running: &'static str,
    pub badge_stopped: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    loading: "Loading chart...",
    chart_failed_title: "Chart could not be loaded!",
    data_failed_title: "Data could not be loaded!",
    failure_hint: "Please refresh the page or choose a different symbol.",
    unknown_error: "An unknown error occurred.",
    start_bot: "Start Bot",
    stop_bot: "Stop Bot",
    badge_running: "Running",
    badge_stopped: "Stopped",
};
