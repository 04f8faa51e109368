//! Configuration module for the kline dashboard.

pub mod api;
pub mod chart;
pub mod defaults;
pub mod dom;
pub mod text;

mod debug; // Private on purpose: use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use api::{API, ApiConfig};
pub use chart::CHART_CONFIG;
pub use defaults::DEFAULTS;
pub use dom::DOM_IDS;
pub use text::UI_TEXT;
