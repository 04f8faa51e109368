use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{API, ApiConfig};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::kline_rows::{backend_error_message, parse_klines_body};
use crate::data::request_token::RequestToken;
use crate::domain::{Candle, KlineQuery};
use crate::utils::app_time;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// Non-2xx status. `message` is the backend's `error` field when the body had one.
    #[error("HTTP error! status: {status}{}", status_suffix(.message))]
    Status { status: u16, message: Option<String> },
    /// 2xx status but the JSON carried an `error` field
    #[error("{0}")]
    Backend(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("kline row {index} is malformed: {reason}")]
    MalformedRow { index: usize, reason: String },
}

impl FetchError {
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout)
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

/// Anything that can turn a symbol / interval into candles.
///
/// The token is only carried through for logging; staleness is decided by whoever issued it.
#[async_trait(?Send)]
pub trait KlineFetcher {
    async fn fetch_candles(
        &self,
        query: &KlineQuery,
        token: RequestToken,
    ) -> Result<Vec<Candle>, FetchError>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// `POST /api/klines` against the dashboard backend.
#[derive(Debug, Clone)]
pub struct HttpKlineFetcher {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpKlineFetcher {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = build_http_client()
            .map_err(|e| FetchError::Transport(format!("could not build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl KlineFetcher for HttpKlineFetcher {
    fn signature(&self) -> &'static str {
        "Backend /api/klines"
    }

    async fn fetch_candles(
        &self,
        query: &KlineQuery,
        token: RequestToken,
    ) -> Result<Vec<Candle>, FetchError> {
        let url = self.config.url(API.endpoints.klines);
        let timeout = self.config.timeout;
        let start = app_time::now();
        log::debug!("Requesting klines {} {} from {}", token, query, url);

        let response = self
            .http
            .post(&url)
            .json(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        if !status.is_success() {
            let message = serde_json::from_str(&body)
                .ok()
                .and_then(|v| backend_error_message(&v));
            log::error!("{} klines request failed with status {}", query, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let candles = parse_klines_body(&body)?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_timing {
            log::info!(
                "{} {} returned {} klines in {}ms",
                token,
                query,
                candles.len(),
                app_time::elapsed_ms(start)
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = start;

        Ok(candles)
    }
}

pub(crate) fn build_http_client() -> reqwest::Result<reqwest::Client> {
    #[cfg(not(target_arch = "wasm32"))]
    let builder = reqwest::Client::builder().user_agent(API.client.user_agent);

    // The browser owns the user agent
    #[cfg(target_arch = "wasm32")]
    let builder = reqwest::Client::builder();

    builder.build()
}
