//! Number and date formatting for price read-outs (the native summary line uses these).

use crate::utils::time_utils::epoch_ms_to_utc_datetime;

pub const DEFAULT_CURRENCY: &str = "USDT";
pub const DEFAULT_DECIMALS: usize = 2;

/// `12.345` -> `"12.35 USDT"` (with the defaults)
pub fn format_currency(value: f64, currency: &str, decimals: usize) -> String {
    format!("{:.*} {}", decimals, value, currency)
}

/// `1.5` -> `"1.50%"`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Epoch milliseconds as `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn format_date(epoch_ms: i64) -> String {
    epoch_ms_to_utc_datetime(epoch_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_rounds_to_decimals() {
        assert_eq!(
            format_currency(12.345_6, DEFAULT_CURRENCY, DEFAULT_DECIMALS),
            "12.35 USDT"
        );
        assert_eq!(format_currency(0.1, "BTC", 8), "0.10000000 BTC");
    }

    #[test]
    fn percent_keeps_trailing_zeros() {
        assert_eq!(format_percent(1.5, DEFAULT_DECIMALS), "1.50%");
        assert_eq!(format_percent(-0.125, 1), "-0.1%");
    }

    #[test]
    fn date_is_utc() {
        assert_eq!(format_date(1_700_000_000_000), "2023-11-14 22:13:20");
    }
}
