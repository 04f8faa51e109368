use chrono::DateTime;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_3_MIN: i64 = Self::MS_IN_MIN * 3;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_MIN * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_MIN * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_2_H: i64 = Self::MS_IN_H * 2;
    pub const MS_IN_4_H: i64 = Self::MS_IN_H * 4;
    pub const MS_IN_6_H: i64 = Self::MS_IN_H * 6;
    pub const MS_IN_8_H: i64 = Self::MS_IN_H * 8;
    pub const MS_IN_12_H: i64 = Self::MS_IN_H * 12;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_3_D: i64 = Self::MS_IN_D * 3;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const MS_IN_1_M: i64 = Self::MS_IN_D * 30;
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const STANDARD_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Backend timestamps are milliseconds, the chart wants whole seconds.
pub fn ms_to_sec(epoch_ms: i64) -> i64 {
    epoch_ms.div_euclid(TimeUtils::MS_IN_S)
}

pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    // Used for display purposes; out-of-range values render as empty rather than panicking
    DateTime::from_timestamp(epoch_sec, 0)
        .map(|dt| dt.format(TimeUtils::STANDARD_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn epoch_ms_to_utc_datetime(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|dt| dt.format(TimeUtils::STANDARD_DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}
