//! simd-json bookTicker decoder
//!
//! simd-json parses in place, so each line is copied into a reusable scratch
//! buffer first. Combined-stream envelopes (`{"stream":..,"data":{..}}`) are
//! unwrapped.

use super::{parse_f64, BookTicker, DecodeError, MessageDecoder};
use crate::core::{resolve_wire_symbol, SymbolResolver};
use simd_json::prelude::*;
use simd_json::BorrowedValue;

/// Decoder backed by a full simd-json parse
pub struct SimdJsonDecoder<R> {
    resolver: R,
    scratch: Vec<u8>,
}

impl<R: SymbolResolver> SimdJsonDecoder<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            scratch: Vec::with_capacity(512),
        }
    }
}

fn str_field<'v>(obj: &'v BorrowedValue<'_>, field: &'static str) -> Result<&'v str, DecodeError> {
    obj.get(field)
        .ok_or(DecodeError::MissingField(field))?
        .as_str()
        .ok_or(DecodeError::InvalidNumber(field))
}

fn price_field(obj: &BorrowedValue<'_>, field: &'static str) -> Result<f64, DecodeError> {
    parse_f64(str_field(obj, field)?.as_bytes()).ok_or(DecodeError::InvalidNumber(field))
}

impl<R: SymbolResolver> MessageDecoder for SimdJsonDecoder<R> {
    fn decode(&mut self, line: &[u8]) -> Result<BookTicker, DecodeError> {
        self.scratch.clear();
        self.scratch.extend_from_slice(line);

        let value = simd_json::to_borrowed_value(&mut self.scratch)
            .map_err(|e| DecodeError::Json(e.to_string()))?;
        let obj = value.get("data").unwrap_or(&value);

        let symbol = obj
            .get("s")
            .and_then(|s| s.as_str())
            .ok_or(DecodeError::MissingField("s"))?;
        let id = resolve_wire_symbol(&self.resolver, symbol.as_bytes())
            .ok_or_else(|| DecodeError::UnknownSymbol(symbol.to_string()))?;

        let update_id = obj
            .get("u")
            .ok_or(DecodeError::MissingField("u"))?
            .as_u64()
            .ok_or(DecodeError::InvalidNumber("u"))?;

        let event_time_ms = match obj.get("E") {
            Some(v) => Some(v.as_u64().ok_or(DecodeError::InvalidNumber("E"))?),
            None => None,
        };

        Ok(BookTicker {
            id,
            update_id,
            bid_price: price_field(obj, "b")?,
            bid_qty: price_field(obj, "B")?,
            ask_price: price_field(obj, "a")?,
            ask_qty: price_field(obj, "A")?,
            event_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::ScanDecoder;
    use crate::test_utils::sample_table;

    const LINES: &[&[u8]] = &[
        br#"{"u":400900217,"s":"BNBUSDT","b":"25.35190000","B":"31.21000000","a":"25.36520000","A":"40.66000000"}"#,
        br#"{"e":"bookTicker","u":7,"E":1568014460893,"T":1568014460891,"s":"SOLBTC","b":"0.0021","B":"10","a":"0.0022","A":"4"}"#,
        br#"{"stream":"btcusdt@bookTicker","data":{"u":9,"s":"BTCUSDT","b":"64000.1","B":"0.5","a":"64000.2","A":"1.5"}}"#,
    ];

    #[test]
    fn test_agrees_with_scan_decoder() {
        let table = sample_table();
        let mut simd = SimdJsonDecoder::new(&table);
        let mut scan = ScanDecoder::new(&table);

        for line in LINES {
            assert_eq!(simd.decode(line).unwrap(), scan.decode(line).unwrap());
        }
    }

    #[test]
    fn test_envelope_unwrapped() {
        let table = sample_table();
        let mut decoder = SimdJsonDecoder::new(&table);
        let ticker = decoder.decode(LINES[2]).unwrap();
        assert_eq!(Some(ticker.id), table.get("btcusdt"));
        assert_eq!(ticker.update_id, 9);
    }

    #[test]
    fn test_errors() {
        let table = sample_table();
        let mut decoder = SimdJsonDecoder::new(&table);

        assert!(matches!(decoder.decode(b"{not json"), Err(DecodeError::Json(_))));
        assert_eq!(
            decoder.decode(br#"{"u":1,"s":"ZZZUSDT","b":"1","B":"1","a":"1","A":"1"}"#),
            Err(DecodeError::UnknownSymbol("ZZZUSDT".to_string()))
        );
        assert_eq!(
            decoder.decode(br#"{"u":"x","s":"BTCUSDT","b":"1","B":"1","a":"1","A":"1"}"#),
            Err(DecodeError::InvalidNumber("u"))
        );
    }
}
