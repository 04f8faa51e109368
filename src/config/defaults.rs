//! Fallback values used when the page hands us missing or junk input.

pub struct Defaults {
    /// Substituted for an empty / "undefined" / "null" symbol
    pub symbol: &'static str,
    /// Substituted for an empty / "undefined" / "null" interval
    pub interval: &'static str,
    /// Strategy sent with a bot start request
    pub strategy: &'static str,
    /// Exchange prefix for the qualified display symbol (e.g. "BINANCE:BTCUSDT")
    pub exchange: &'static str,
    /// Input values the browser produces when a field was never populated
    pub junk_inputs: &'static [&'static str],
}

pub const DEFAULTS: Defaults = Defaults {
    symbol: "BTCUSDT",
    interval: "1h",
    strategy: "MACD_EMA",
    exchange: "BINANCE",
    junk_inputs: &["undefined", "null"],
};
