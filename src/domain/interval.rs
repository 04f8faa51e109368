//! Candle bucket widths the backend (Binance under the hood) understands.

use std::str::FromStr;

use crate::utils::TimeUtils;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumIter,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum Interval {
    #[strum(serialize = "1s")]
    Second1,
    #[strum(serialize = "1m")]
    Minute1,
    #[strum(serialize = "3m")]
    Minute3,
    #[strum(serialize = "5m")]
    Minute5,
    #[strum(serialize = "15m")]
    Minute15,
    #[strum(serialize = "30m")]
    Minute30,
    #[strum(serialize = "1h")]
    Hour1,
    #[strum(serialize = "2h")]
    Hour2,
    #[strum(serialize = "4h")]
    Hour4,
    #[strum(serialize = "6h")]
    Hour6,
    #[strum(serialize = "8h")]
    Hour8,
    #[strum(serialize = "12h")]
    Hour12,
    #[strum(serialize = "1d")]
    Day1,
    #[strum(serialize = "3d")]
    Day3,
    #[strum(serialize = "1w")]
    Week1,
    #[strum(serialize = "1M")]
    Month1,
}

impl Interval {
    pub fn to_ms(&self) -> i64 {
        match self {
            Interval::Second1 => TimeUtils::MS_IN_S,
            Interval::Minute1 => TimeUtils::MS_IN_MIN,
            Interval::Minute3 => TimeUtils::MS_IN_3_MIN,
            Interval::Minute5 => TimeUtils::MS_IN_5_MIN,
            Interval::Minute15 => TimeUtils::MS_IN_15_MIN,
            Interval::Minute30 => TimeUtils::MS_IN_30_MIN,
            Interval::Hour1 => TimeUtils::MS_IN_H,
            Interval::Hour2 => TimeUtils::MS_IN_2_H,
            Interval::Hour4 => TimeUtils::MS_IN_4_H,
            Interval::Hour6 => TimeUtils::MS_IN_6_H,
            Interval::Hour8 => TimeUtils::MS_IN_8_H,
            Interval::Hour12 => TimeUtils::MS_IN_12_H,
            Interval::Day1 => TimeUtils::MS_IN_D,
            Interval::Day3 => TimeUtils::MS_IN_3_D,
            Interval::Week1 => TimeUtils::MS_IN_W,
            Interval::Month1 => TimeUtils::MS_IN_1_M,
        }
    }

    /// Case matters: "1m" is a minute, "1M" is a month.
    pub fn parse(text: &str) -> Option<Self> {
        Self::from_str(text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn minute_and_month_are_distinct() {
        assert_eq!(Interval::parse("1m"), Some(Interval::Minute1));
        assert_eq!(Interval::parse("1M"), Some(Interval::Month1));
    }

    #[test]
    fn display_matches_parse_for_every_interval() {
        for interval in Interval::iter() {
            assert_eq!(Interval::parse(&interval.to_string()), Some(interval));
        }
    }

    #[test]
    fn widths_increase_monotonically() {
        let widths: Vec<i64> = Interval::iter().map(|i| i.to_ms()).collect();
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Interval::Hour1.to_ms(), 3_600_000);
    }

    #[test]
    fn unknown_interval_is_none() {
        assert_eq!(Interval::parse("7h"), None);
    }
}
