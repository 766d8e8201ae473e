//! Core types for the symbol id space
//!
//! This module contains the fundamental types used throughout the system:
//! - SymbolId: Dense integer id for a trading pair
//! - SymbolRecord / NormalizedSymbolSet: Exchange metadata and its canonical form
//! - SymbolTable: The symbol -> id relation
//! - SymbolResolver: Lookup seam shared by every lookup path

pub mod normalizer;
pub mod resolver;
pub mod symbol;
pub mod table;

pub use normalizer::{normalize, ExchangeInfo, NormalizedSymbolSet, SymbolRecord, TradingStatus};
pub use resolver::{resolve_wire_symbol, DynamicSymbolMap, SymbolResolver, MAX_SYMBOL_LEN};
pub use symbol::SymbolId;
pub use table::{SymbolTable, TableError};
