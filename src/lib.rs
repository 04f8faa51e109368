#![allow(clippy::collapsible_if)]

// Core modules
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod ui;
pub mod utils;

// Terminal rendition for the native binary
#[cfg(not(target_arch = "wasm32"))]
pub mod console;

// Browser binding
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use chart::{ChartAdapter, RenderOutcome};
pub use data::{HttpBotClient, HttpKlineFetcher};
pub use domain::{Candle, KlineQuery};
pub use ui::{BotState, Dashboard};
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;

use crate::config::{API, DEFAULTS};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, default_value = API.client.base_url)]
    pub base_url: String,

    /// Trading pair, e.g. ETHUSDT
    #[arg(long, default_value = DEFAULTS.symbol)]
    pub symbol: String,

    /// Kline interval, e.g. 15m, 1h, 1d
    #[arg(long, default_value = DEFAULTS.interval)]
    pub interval: String,

    /// Per-request timeout
    #[arg(long, default_value_t = API.client.timeout_ms / 1000)]
    pub timeout_secs: u64,

    /// Ask the backend to stop the bot, as the page does on every market change
    #[arg(long, default_value_t = false)]
    pub stop_bot: bool,

    /// Print the interval names the dashboard knows and exit
    #[arg(long, default_value_t = false)]
    pub list_intervals: bool,
}
