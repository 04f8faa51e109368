use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{API, ApiConfig, UI_TEXT};
use crate::data::kline_fetcher::build_http_client;
use crate::data::kline_rows::backend_error_message;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BotError {
    /// Non-2xx. The backend sometimes answers with a bare exception string or an HTML
    /// traceback, so the raw text is kept for the log.
    #[error("server responded with status {status}: {body}")]
    Status {
        status: u16,
        /// Canonical reason phrase, e.g. "Internal Server Error"
        status_text: Option<String>,
        body: String,
    },
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl BotError {
    fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            BotError::Timeout(timeout)
        } else {
            BotError::Transport(err.to_string())
        }
    }

    /// The `error` field of a JSON error body, if there was one.
    pub fn json_error(&self) -> Option<String> {
        match self {
            BotError::Status { body, .. } => serde_json::from_str(body)
                .ok()
                .and_then(|v| backend_error_message(&v)),
            _ => None,
        }
    }

    /// HTTP status text for status errors; for everything else the error itself.
    pub fn status_text(&self) -> Option<String> {
        match self {
            BotError::Status { status_text, .. } => status_text.clone(),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BotStartRequest {
    pub symbol: String,
    pub interval: String,
    pub strategy: String,
}

/// Reply to start / stop. `success: false` is a normal answer (e.g. "bot is not running").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BotCommandResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BotCommandResponse {
    pub fn failure_reason(&self) -> &str {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or(UI_TEXT.unknown_error)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BotStatus {
    pub running: bool,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    /// ISO-8601 string as produced by the backend
    #[serde(default)]
    pub last_check: Option<String>,
    #[serde(default)]
    pub last_signal: Option<serde_json::Value>,
}

#[async_trait(?Send)]
pub trait BotClient {
    async fn start_bot(&self, request: &BotStartRequest) -> Result<BotCommandResponse, BotError>;
    async fn stop_bot(&self) -> Result<BotCommandResponse, BotError>;
    async fn bot_status(&self) -> Result<BotStatus, BotError>;
}

#[derive(Debug, Clone)]
pub struct HttpBotClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpBotClient {
    pub fn new(config: ApiConfig) -> Result<Self, BotError> {
        let http = build_http_client()
            .map_err(|e| BotError::Transport(format!("could not build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BotError> {
        let timeout = self.config.timeout;
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| BotError::from_reqwest(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::from_reqwest(e, timeout))?;

        if !status.is_success() {
            log::error!("Bot request failed with status {}: {}", status, body);
            return Err(BotError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().map(str::to_string),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| BotError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl BotClient for HttpBotClient {
    async fn start_bot(&self, request: &BotStartRequest) -> Result<BotCommandResponse, BotError> {
        let url = self.config.url(API.endpoints.bot_start);
        log::info!(
            "▶️  Starting bot: {} {} {}",
            request.symbol,
            request.interval,
            request.strategy
        );
        self.read_json(self.http.post(url).json(request)).await
    }

    async fn stop_bot(&self) -> Result<BotCommandResponse, BotError> {
        let url = self.config.url(API.endpoints.bot_stop);
        log::info!("⏹️  Stopping bot");
        self.read_json(self.http.post(url)).await
    }

    async fn bot_status(&self) -> Result<BotStatus, BotError> {
        let url = self.config.url(API.endpoints.bot_status);
        self.read_json(self.http.get(url)).await
    }
}
