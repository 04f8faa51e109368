use serde::{Deserialize, Serialize};

use crate::config::DEFAULTS;
use crate::domain::Interval;

/// Body of a kline request, exactly as the backend wants it.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct KlineQuery {
    pub symbol: String,
    pub interval: String,
}

impl KlineQuery {
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
        }
    }

    /// Bucket width when the interval is one we know; unknown ones still go to the backend.
    pub fn interval_ms(&self) -> Option<i64> {
        Interval::parse(&self.interval).map(|i| i.to_ms())
    }
}

impl std::fmt::Display for KlineQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} @ {}", self.symbol, self.interval)
    }
}

/// What the symbol / interval inputs held once junk values were replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSelection {
    pub query: KlineQuery,
    /// The symbol input must be rewritten with `query.symbol`
    pub symbol_substituted: bool,
    /// The interval input must be rewritten with `query.interval`
    pub interval_substituted: bool,
}

impl MarketSelection {
    pub fn from_inputs(raw_symbol: &str, raw_interval: &str) -> Self {
        let (symbol, symbol_substituted) = sanitize_input(raw_symbol, DEFAULTS.symbol);
        let (interval, interval_substituted) = sanitize_input(raw_interval, DEFAULTS.interval);

        if symbol_substituted {
            log::warn!(
                "Invalid symbol {:?}, falling back to {}",
                raw_symbol,
                DEFAULTS.symbol
            );
        }
        if interval_substituted {
            log::warn!(
                "Invalid interval {:?}, falling back to {}",
                raw_interval,
                DEFAULTS.interval
            );
        } else if Interval::parse(&interval).is_none() {
            log::debug!("Interval {} is not a known width, passing it through", interval);
        }

        Self {
            query: KlineQuery::new(symbol, interval),
            symbol_substituted,
            interval_substituted,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.query.symbol
    }

    pub fn interval(&self) -> &str {
        &self.query.interval
    }
}

// Empty, whitespace-only, or the stringified JS nothing-values all count as missing.
// Anything else goes to the backend without surrounding whitespace.
fn sanitize_input(raw: &str, fallback: &str) -> (String, bool) {
    let trimmed = raw.trim();
    if trimmed.is_empty() || DEFAULTS.junk_inputs.contains(&trimmed) {
        (fallback.to_string(), true)
    } else {
        (trimmed.to_string(), false)
    }
}

/// "BTCUSDT" -> "BINANCE:BTCUSDT"; anything already carrying an exchange prefix is left alone.
pub fn qualified_symbol(symbol: &str) -> String {
    if symbol.contains(':') {
        symbol.to_string()
    } else {
        format!("{}:{}", DEFAULTS.exchange, symbol)
    }
}

// Finds the trading quote at the end of the pair name and returns it.
// Returns None if no matching quote is found.
pub fn get_quote(symbol: &str) -> Option<&str> {
    static PAIR_QUOTES: &[&str] = &["USDT", "USDC", "FDUSD", "BTC", "ETH"];
    PAIR_QUOTES
        .iter()
        .find(|&&quote| symbol.ends_with(quote) && symbol.len() > quote.len())
        .copied()
}

pub fn get_base(symbol: &str) -> Option<&str> {
    let quote = get_quote(symbol)?;
    symbol.strip_suffix(quote)
}

/// Split the name into base and quote assets, used for display and currency formatting.
pub fn split_symbol(symbol: &str) -> Option<(&str, &str)> {
    Some((get_base(symbol)?, get_quote(symbol)?))
}
