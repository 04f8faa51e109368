// View binding: maps page events onto the chart adapter and the bot client
pub mod alerts;
pub mod bot_control;
pub mod dashboard;
pub mod format;
pub mod markup;

// Re-export main controller
pub use alerts::{AlertBanner, AlertLevel};
pub use bot_control::{BotButtonView, BotState};
pub use dashboard::{ControlPanel, DashError, Dashboard};
