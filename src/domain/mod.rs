// Domain types and value objects
pub mod candle;
pub mod interval;
pub mod market_selection;

// Re-export commonly used types
pub use candle::{Candle, CandleType};
pub use interval::Interval;
pub use market_selection::{KlineQuery, MarketSelection};
