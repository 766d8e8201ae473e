//! Symbol normalization (cold path)
//!
//! Reduces raw exchange metadata to the canonical symbol sequence:
//! tradable only, lowercase, unique, sorted by byte value.
//! Pure transformation - all I/O lives in `crate::source`.

use crate::source::SourceError;
use serde::Deserialize;

/// Exchange metadata document (`exchangeInfo` shape)
///
/// Only the `symbols` array is consumed; every other field is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolRecord>,
}

/// One symbol entry from exchange metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolRecord {
    pub symbol: String,
    #[serde(rename = "status")]
    pub trading_status: TradingStatus,
}

/// Trading status as reported by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TradingStatus {
    #[serde(rename = "TRADING")]
    Trading,
    /// BREAK, HALT, END_OF_DAY, ... - anything not tradable
    #[serde(other)]
    Other,
}

impl SymbolRecord {
    pub fn new(symbol: impl Into<String>, trading_status: TradingStatus) -> Self {
        Self {
            symbol: symbol.into(),
            trading_status,
        }
    }

    #[inline]
    pub fn is_trading(&self) -> bool {
        self.trading_status == TradingStatus::Trading
    }
}

/// Sorted, deduplicated, lowercase symbol sequence
///
/// The order of this sequence is the id assignment contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSymbolSet {
    symbols: Vec<String>,
}

impl NormalizedSymbolSet {
    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.symbols
    }
}

/// Normalize exchange records into the canonical symbol sequence
///
/// Keeps `TRADING` records, lowercases, drops exact duplicates and sorts
/// ascending by bytes. An empty result is returned as-is; callers decide how
/// to surface it.
///
/// # Errors
/// `SourceError::MalformedSymbol` if a tradable symbol is empty, starts with
/// `%`, or contains whitespace, control characters, `,` or `"`. Those are the
/// characters the keyword section of the perfect-hash source cannot carry;
/// anything else, including non-ASCII names, passes through.
pub fn normalize<'a, I>(records: I) -> Result<NormalizedSymbolSet, SourceError>
where
    I: IntoIterator<Item = &'a SymbolRecord>,
{
    let mut symbols = Vec::new();

    for record in records.into_iter().filter(|r| r.is_trading()) {
        if !is_well_formed(&record.symbol) {
            return Err(SourceError::MalformedSymbol(record.symbol.clone()));
        }
        symbols.push(record.symbol.to_ascii_lowercase());
    }

    symbols.sort_unstable();
    let before = symbols.len();
    symbols.dedup();

    let duplicates = before - symbols.len();
    if duplicates > 0 {
        tracing::warn!("Dropped {} duplicate symbols during normalization", duplicates);
    }

    Ok(NormalizedSymbolSet { symbols })
}

#[inline]
fn is_well_formed(symbol: &str) -> bool {
    !symbol.is_empty()
        && !symbol.starts_with('%')
        && !symbol
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == ',' || c == '"')
}
