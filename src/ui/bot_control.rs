//! Start/stop button state machine.
//!
//! The UI state follows backend replies, so it can disagree with the real bot when a
//! stop request fails. Symbol / interval changes always ask for a stop.

use crate::config::UI_TEXT;
use crate::data::{BotCommandResponse, BotError, BotStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum BotState {
    #[default]
    Stopped,
    Running,
}

/// Everything the button and the badge need; classes are Bootstrap's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotButtonView {
    pub label: &'static str,
    pub icon: &'static str,
    pub button_class: &'static str,
    pub stale_button_class: &'static str,
    pub badge_text: &'static str,
    pub badge_class: &'static str,
    pub stale_badge_class: &'static str,
}

impl BotState {
    pub fn view(&self) -> BotButtonView {
        match self {
            BotState::Stopped => BotButtonView {
                label: UI_TEXT.start_bot,
                icon: "bi-play-fill",
                button_class: "btn-success",
                stale_button_class: "btn-danger",
                badge_text: UI_TEXT.badge_stopped,
                badge_class: "bg-secondary",
                stale_badge_class: "bg-success",
            },
            BotState::Running => BotButtonView {
                label: UI_TEXT.stop_bot,
                icon: "bi-stop-fill",
                button_class: "btn-danger",
                stale_button_class: "btn-success",
                badge_text: UI_TEXT.badge_running,
                badge_class: "bg-success",
                stale_badge_class: "bg-secondary",
            },
        }
    }

    pub fn from_status(status: &BotStatus) -> Self {
        if status.running {
            BotState::Running
        } else {
            BotState::Stopped
        }
    }

    /// State after a stop request; anything but an explicit success leaves it alone.
    pub fn after_stop(self, reply: &Result<BotCommandResponse, BotError>) -> Self {
        match reply {
            Ok(response) if response.success => BotState::Stopped,
            _ => self,
        }
    }

    pub fn after_start(self, reply: &Result<BotCommandResponse, BotError>) -> Self {
        match reply {
            Ok(response) if response.success => BotState::Running,
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(success: bool) -> Result<BotCommandResponse, BotError> {
        Ok(BotCommandResponse {
            success,
            ..Default::default()
        })
    }

    #[test]
    fn stop_success_stops_from_any_state() {
        assert_eq!(BotState::Running.after_stop(&ok(true)), BotState::Stopped);
        assert_eq!(BotState::Stopped.after_stop(&ok(true)), BotState::Stopped);
    }

    #[test]
    fn failed_stop_keeps_current_state() {
        assert_eq!(BotState::Running.after_stop(&ok(false)), BotState::Running);
        let transport = Err(BotError::Transport("connection refused".into()));
        assert_eq!(BotState::Running.after_stop(&transport), BotState::Running);
    }

    #[test]
    fn start_only_runs_on_success() {
        assert_eq!(BotState::Stopped.after_start(&ok(true)), BotState::Running);
        assert_eq!(BotState::Stopped.after_start(&ok(false)), BotState::Stopped);
    }

    #[test]
    fn views_swap_classes() {
        let stopped = BotState::Stopped.view();
        let running = BotState::Running.view();
        assert_eq!(stopped.button_class, running.stale_button_class);
        assert_eq!(running.badge_class, stopped.stale_badge_class);
        assert_eq!(stopped.badge_text, "Stopped");
        assert_eq!(running.label, "Stop Bot");
    }
}
