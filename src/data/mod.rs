// Backend access: kline fetching and bot control
pub mod bot_client;
pub mod kline_fetcher;
pub mod kline_rows;
pub mod request_token;

// Re-export commonly used types
pub use bot_client::{
    BotClient, BotCommandResponse, BotError, BotStartRequest, BotStatus, HttpBotClient,
};
pub use kline_fetcher::{FetchError, HttpKlineFetcher, KlineFetcher};
pub use request_token::{RequestToken, TokenIssuer};
