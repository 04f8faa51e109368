//! Backend API configuration constants and types.

use std::time::Duration;

/// Backend endpoint paths (relative to the base URL)
pub struct ApiEndpoints {
    /// OHLC data, `POST {symbol, interval}`
    pub klines: &'static str,
    /// Start the trading bot, `POST {symbol, interval, strategy}`
    pub bot_start: &'static str,
    /// Stop the trading bot, `POST` without a body
    pub bot_stop: &'static str,
    /// Current bot status, `GET`
    pub bot_status: &'static str,
}

/// Default values for the HTTP clients
pub struct ClientDefaults {
    /// Base URL used by the native binary when none is given
    pub base_url: &'static str,
    /// Upper bound on a single request before it is treated as failed
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

/// The Master API Configuration Struct
pub struct ApiSettings {
    pub endpoints: ApiEndpoints,
    pub client: ClientDefaults,
}

pub const API: ApiSettings = ApiSettings {
    endpoints: ApiEndpoints {
        klines: "/api/klines",
        bot_start: "/api/bot/start",
        bot_stop: "/api/bot/stop",
        bot_status: "/api/bot/status",
    },
    client: ClientDefaults {
        base_url: "http://127.0.0.1:5000",
        timeout_ms: 10_000,
        user_agent: "kline-dash/0.1",
    },
};

/// Runtime configuration for the HTTP clients
/// (built from `API`, overridable from the CLI or the page origin)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API.client.base_url.to_string(),
            timeout: Duration::from_millis(API.client.timeout_ms),
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join the base URL with an endpoint path, tolerating a trailing slash on the base.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
