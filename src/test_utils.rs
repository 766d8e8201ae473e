//! Test fixtures shared by unit tests
//!
//! Tests that need a realistic symbol universe build it through the same
//! normalize/assign path the generator uses.

use crate::core::{normalize, SymbolRecord, SymbolTable, TradingStatus};

/// Wire-format (uppercase) symbols, a mix of USDT and BTC quotes
pub const SAMPLE_SYMBOLS: &[&str] = &[
    "BTCUSDT", "ETHUSDT", "SOLUSDT", "DOTUSDT", "PEPEUSDT", "BNBUSDT", "XRPUSDT", "ADAUSDT",
    "DOGEUSDT", "AVAXUSDT", "TRXUSDT", "LINKUSDT", "UNIUSDT", "AAVEUSDT", "ARBUSDT", "ENAUSDT",
    "GALAUSDT", "GMTUSDT", "INJUSDT", "NEARUSDT", "OPUSDT", "RNDRUSDT", "SANDUSDT", "SEIUSDT",
    "STRKUSDT", "SUIUSDT", "TONUSDT", "TURBOUSDT", "VIRTUALUSDT", "WLDUSDT", "KAITOUSDT",
    "LDOUSDT", "LEVERUSDT", "MEUSDT", "PYTHUSDT", "TNSRUSDT", "BERAUSDT", "TRIAUSDT",
    "BLESSUSDT", "DYDXUSDT", "MYXUSDT", "SONICUSDT", "WIFUSDT", "BONKUSDT", "FLOKIUSDT",
    "1000PEPEUSDT", "ETHBTC", "BNBBTC", "SOLBTC", "LTCBTC",
];

pub fn sample_records() -> Vec<SymbolRecord> {
    SAMPLE_SYMBOLS
        .iter()
        .map(|s| SymbolRecord::new(*s, TradingStatus::Trading))
        .collect()
}

/// 50-entry table built from `SAMPLE_SYMBOLS`
pub fn sample_table() -> SymbolTable {
    let set = normalize(&sample_records()).expect("sample symbols are well formed");
    SymbolTable::assign(set)
}
