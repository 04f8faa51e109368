//! Turns the backend's `[[timestampMs, open, high, low, close, ...], ...]` payload into candles.

use serde_json::Value;

use crate::data::kline_fetcher::FetchError;
use crate::domain::Candle;
use crate::utils::time_utils::ms_to_sec;

// Only the first five fields matter; volumes, close time etc. are ignored
const REQUIRED_FIELDS: usize = 5;

/// Parse a response body that came back with a success status.
///
/// An object carrying a truthy `error` is still a failure, whatever the status said.
pub fn parse_klines_body(body: &str) -> Result<Vec<Candle>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if let Some(message) = backend_error_message(&value) {
        return Err(FetchError::Backend(message));
    }

    match value {
        Value::Array(rows) => convert_rows(rows),
        other => Err(FetchError::Decode(format!(
            "expected an array of klines, got {}",
            json_kind(&other)
        ))),
    }
}

/// The `error` field of an object body, if it holds anything truthy.
pub fn backend_error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn convert_rows(rows: Vec<Value>) -> Result<Vec<Candle>, FetchError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| row_to_candle(index, row))
        .collect()
}

fn row_to_candle(index: usize, row: Value) -> Result<Candle, FetchError> {
    let malformed = |reason: String| FetchError::MalformedRow { index, reason };

    let Value::Array(fields) = row else {
        return Err(malformed(format!("expected an array, got {}", json_kind(&row))));
    };
    if fields.len() < REQUIRED_FIELDS {
        return Err(malformed(format!(
            "expected at least {} fields, got {}",
            REQUIRED_FIELDS,
            fields.len()
        )));
    }

    let open_time_ms = timestamp_ms(&fields[0])
        .ok_or_else(|| malformed(format!("bad open time {}", fields[0])))?;

    Ok(Candle {
        time: ms_to_sec(open_time_ms.floor() as i64),
        open: parse_float(&fields[1]),
        high: parse_float(&fields[2]),
        low: parse_float(&fields[3]),
        close: parse_float(&fields[4]),
    })
}

// Numbers as-is; numeric strings are accepted too since some proxies stringify everything
fn timestamp_ms(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|ms| ms.is_finite())
}

/// Browser `parseFloat` semantics: numbers pass through, strings use their longest
/// numeric prefix ("105.5abc" -> 105.5), anything else is NaN.
pub fn parse_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_str(s),
        _ => f64::NAN,
    }
}

pub fn parse_float_str(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse::<f64>().unwrap_or(f64::NAN);
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when it has digits ("1e" parses as 1)
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
