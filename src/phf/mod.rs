//! Minimal perfect hashing for the symbol id space
//!
//! - hash: Seeded byte hash split into bucket/displacement inputs
//! - compiler: Offline hash-and-displace construction over a fixed key set
//! - table: The compiled, immutable lookup engine used on the hot path

pub mod compiler;
pub mod hash;
pub mod table;

pub use compiler::{CompileError, DisplacementCompiler, HashTableCompiler};
pub use hash::{displace, hash, Hashes};
pub use table::{PerfectHashTable, SymbolEntry};
