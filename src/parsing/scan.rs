//! Byte-scan bookTicker decoder
//!
//! Zero-copy, zero-allocation: fields are located with `find_field` and the
//! symbol is lowercased on the stack before lookup.

use super::{find_field, parse_f64, parse_u64, BookTicker, DecodeError, MessageDecoder};
use crate::core::{resolve_wire_symbol, SymbolResolver};

/// Decoder that scans raw bytes for each field
pub struct ScanDecoder<R> {
    resolver: R,
}

impl<R: SymbolResolver> ScanDecoder<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

#[inline]
fn price_field(line: &[u8], field: &'static str) -> Result<f64, DecodeError> {
    let bytes = find_field(line, field.as_bytes()).ok_or(DecodeError::MissingField(field))?;
    parse_f64(bytes).ok_or(DecodeError::InvalidNumber(field))
}

impl<R: SymbolResolver> MessageDecoder for ScanDecoder<R> {
    #[inline]
    fn decode(&mut self, line: &[u8]) -> Result<BookTicker, DecodeError> {
        let symbol = find_field(line, b"s").ok_or(DecodeError::MissingField("s"))?;
        let id = resolve_wire_symbol(&self.resolver, symbol)
            .ok_or_else(|| DecodeError::UnknownSymbol(String::from_utf8_lossy(symbol).into_owned()))?;

        let update_id = find_field(line, b"u").ok_or(DecodeError::MissingField("u"))?;
        let update_id = parse_u64(update_id).ok_or(DecodeError::InvalidNumber("u"))?;

        let event_time_ms = match find_field(line, b"E") {
            Some(bytes) => Some(parse_u64(bytes).ok_or(DecodeError::InvalidNumber("E"))?),
            None => None,
        };

        Ok(BookTicker {
            id,
            update_id,
            bid_price: price_field(line, "b")?,
            bid_qty: price_field(line, "B")?,
            ask_price: price_field(line, "a")?,
            ask_qty: price_field(line, "A")?,
            event_time_ms,
        })
    }
}
