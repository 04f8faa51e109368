use serde::{Deserialize, Serialize};

// Define the CandleType enum
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLC bar in the point format the candlestick series expects.
/// `time` is Unix seconds (the backend speaks milliseconds).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Candle {
            time,
            open,
            high,
            low,
            close,
        }
    }

    // Drives the up/down colour choice
    pub fn get_type(&self) -> CandleType {
        if self.close >= self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }
}

/// True when times are strictly ascending, which the chart widget requires.
/// Nothing here enforces it; callers use this for diagnostics only.
pub fn is_strictly_ascending(candles: &[Candle]) -> bool {
    candles.windows(2).all(|pair| pair[0].time < pair[1].time)
}
