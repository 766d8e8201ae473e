//! Symbol resolution pipeline for market-data hot paths
//!
//! Turns an exchange symbol universe into a dense integer id space and a
//! minimal perfect-hash lookup table, and measures that lookup against a
//! dynamic map.

pub mod artifacts;
pub mod bench;
pub mod core;
pub mod infrastructure;
pub mod parsing;
pub mod phf;
pub mod pipeline;
pub mod source;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use crate::core::{NormalizedSymbolSet, SymbolId, SymbolResolver, SymbolTable};
pub use infrastructure::config::Config;
pub use phf::{DisplacementCompiler, HashTableCompiler, PerfectHashTable};

use thiserror::Error;

/// Main error type for the symbol pipeline
#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("Source data error: {0}")]
    Source(#[from] source::SourceError),

    #[error("Symbol table error: {0}")]
    Table(#[from] crate::core::TableError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] artifacts::ArtifactError),

    #[error("Perfect hash compile error: {0}")]
    Compile(#[from] phf::CompileError),

    #[error("Configuration error: {0}")]
    Config(#[from] infrastructure::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SymbolError>;
