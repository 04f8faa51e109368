use crate::config::UI_TEXT;
use crate::data::{BotCommandResponse, BotError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum AlertLevel {
    #[strum(serialize = "danger")]
    Danger,
    #[strum(serialize = "warning")]
    Warning,
}

/// Dismissible banner at the top of the page for failed AJAX calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBanner {
    pub level: AlertLevel,
    pub message: String,
}

impl AlertBanner {
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Danger,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Warning,
            message: message.into(),
        }
    }

    /// The backend's JSON `error` if it sent one, else the HTTP status text, else a generic line.
    pub fn from_ajax(json_error: Option<&str>, status_text: Option<&str>) -> Self {
        let message = [json_error, status_text]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
            .unwrap_or(UI_TEXT.unknown_error);
        Self::danger(message)
    }

    pub fn from_bot_error(err: &BotError) -> Self {
        Self::from_ajax(err.json_error().as_deref(), err.status_text().as_deref())
    }

    /// `success: false` replies are expected answers, so they warn rather than alarm.
    pub fn from_rejected_command(response: &BotCommandResponse) -> Self {
        Self::warning(response.failure_reason())
    }
}
