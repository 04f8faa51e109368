//! HTML fragments for the container, the alert strip and the bot button.

use crate::chart::{ContainerView, ErrorPanel};
use crate::config::{CHART_CONFIG, DOM_IDS};
use crate::ui::alerts::AlertBanner;
use crate::ui::bot_control::BotButtonView;

pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inner HTML for the chart container. `Chart` yields nothing: the widget draws itself,
/// the browser surface only drops the loading overlay.
pub fn container_html(view: &ContainerView) -> String {
    match view {
        ContainerView::Empty | ContainerView::Chart => String::new(),
        ContainerView::Loading { message } => loading_html(message),
        ContainerView::Error(panel) => error_panel_html(panel),
    }
}

fn loading_html(message: &str) -> String {
    format!(
        r#"<div id="{}" class="d-flex justify-content-center align-items-center" style="height: {}px;"><div class="spinner-border text-primary" role="status"></div><span class="ms-2">{}</span></div>"#,
        DOM_IDS.loading_overlay,
        CHART_CONFIG.placeholder_height,
        html_escape(message)
    )
}

fn error_panel_html(panel: &ErrorPanel) -> String {
    format!(
        r#"<div class="alert alert-danger"><h4>{}</h4><p>{}</p><p>{}</p></div>"#,
        html_escape(&panel.title),
        html_escape(&panel.hint),
        html_escape(&panel.detail)
    )
}

pub fn alert_html(alert: &AlertBanner) -> String {
    format!(
        r#"<div class="alert alert-{} alert-dismissible fade show" role="alert"><i class="fas fa-exclamation-triangle"></i> {}<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#,
        alert.level,
        html_escape(&alert.message)
    )
}

pub fn bot_button_html(view: &BotButtonView) -> String {
    format!(r#"<i class="bi {}"></i> {}"#, view.icon, html_escape(view.label))
}
