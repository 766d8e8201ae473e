//! bookTicker message decoding
//!
//! Hot path parsing: the wire symbol is resolved to a dense `SymbolId`
//! through any `SymbolResolver`, so decode cost includes the lookup under
//! test. Two decoders share one contract:
//! - `ScanDecoder` - byte-scan field finder, no allocation
//! - `SimdJsonDecoder` - full simd-json parse into a borrowed value

pub mod scan;
pub mod simd;

pub use scan::ScanDecoder;
pub use simd::SimdJsonDecoder;

use crate::core::SymbolId;

/// Best bid/ask update for one symbol
///
/// Binance format (spot omits `E`/`T`):
/// {
///   "e": "bookTicker",
///   "u": 400900217,
///   "E": 1568014460893,
///   "s": "BNBUSDT",
///   "b": "25.35190000",
///   "B": "31.21000000",
///   "a": "25.36520000",
///   "A": "40.66000000"
/// }
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookTicker {
    pub id: SymbolId,
    pub update_id: u64,
    pub bid_price: f64,
    pub bid_qty: f64,
    pub ask_price: f64,
    pub ask_qty: f64,
    /// Event time in milliseconds, futures streams only
    pub event_time_ms: Option<u64>,
}

/// Decode one line-delimited message into a `BookTicker`
pub trait MessageDecoder {
    fn decode(&mut self, line: &[u8]) -> Result<BookTicker, DecodeError>;
}

/// Per-message decode failures; a benchmark run skips and counts these
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Symbol absent from the lookup table
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid number in field: {0}")]
    InvalidNumber(&'static str),

    #[error("JSON error: {0}")]
    Json(String),
}

/// Fast byte-level JSON field finder
///
/// Returns the value slice (without quotes for strings). Only matches a
/// quoted token followed by `:`, so string values equal to the field name
/// are skipped.
#[inline]
pub fn find_field<'a>(data: &'a [u8], field: &[u8]) -> Option<&'a [u8]> {
    let field_len = field.len();
    let data_len = data.len();

    if field_len == 0 || data_len < field_len + 3 {
        return None;
    }

    let mut i = 0;
    while i + field_len + 2 <= data_len {
        let end = i + 1 + field_len;
        if data[i] == b'"' && &data[i + 1..end] == field && data[end] == b'"' {
            let mut j = end + 1;
            while j < data_len && data[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < data_len && data[j] == b':' {
                j += 1;
                while j < data_len && data[j].is_ascii_whitespace() {
                    j += 1;
                }
                return value_at(data, j);
            }
        }
        i += 1;
    }

    None
}

/// Value starting at `start`: quoted string body, or a bare token
#[inline]
fn value_at(data: &[u8], start: usize) -> Option<&[u8]> {
    if start >= data.len() {
        return None;
    }

    if data[start] == b'"' {
        let body = start + 1;
        let len = data[body..].iter().position(|&b| b == b'"')?;
        return Some(&data[body..body + len]);
    }

    let len = data[start..]
        .iter()
        .position(|&b| matches!(b, b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r'))
        .unwrap_or(data.len() - start);
    Some(&data[start..start + len])
}

/// Parse u64 from bytes
#[inline]
pub fn parse_u64(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }

    let mut result: u64 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?;
        result = result.checked_add((b - b'0') as u64)?;
    }

    Some(result)
}

/// Parse a finite decimal from bytes
#[inline]
pub fn parse_f64(bytes: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(bytes).ok()?;
    let value: f64 = text.parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_field_string() {
        let data = br#"{"s":"BTCUSDT","b":"25000.50"}"#;
        assert_eq!(find_field(data, b"s"), Some(b"BTCUSDT".as_slice()));
        assert_eq!(find_field(data, b"b"), Some(b"25000.50".as_slice()));
    }

    #[test]
    fn test_find_field_number() {
        let data = br#"{"u": 400900217, "E":1568014460893}"#;
        assert_eq!(find_field(data, b"u"), Some(b"400900217".as_slice()));
        assert_eq!(find_field(data, b"E"), Some(b"1568014460893".as_slice()));
    }

    #[test]
    fn test_find_field_is_case_sensitive() {
        let data = br#"{"b":"1.0","B":"2.0"}"#;
        assert_eq!(find_field(data, b"B"), Some(b"2.0".as_slice()));
        assert_eq!(find_field(data, b"A"), None);
    }

    #[test]
    fn test_find_field_skips_matching_values() {
        let data = br#"{"e":"s","s":"ETHBTC"}"#;
        assert_eq!(find_field(data, b"s"), Some(b"ETHBTC".as_slice()));
    }

    #[test]
    fn test_find_field_unterminated_string() {
        assert_eq!(find_field(br#"{"s":"BTCUS"#, b"s"), None);
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64(b"123"), Some(123));
        assert_eq!(parse_u64(b"0"), Some(0));
        assert_eq!(parse_u64(b""), None);
        assert_eq!(parse_u64(b"-1"), None);
        assert_eq!(parse_u64(b"99999999999999999999"), None);
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(b"25.35190000"), Some(25.3519));
        assert_eq!(parse_f64(b"0"), Some(0.0));
        assert_eq!(parse_f64(b"abc"), None);
        assert_eq!(parse_f64(b"NaN"), None);
        assert_eq!(parse_f64(b"inf"), None);
    }
}
