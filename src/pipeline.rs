//! Generation run (cold path)
//!
//! normalize -> assign -> emit. Single-threaded and one-shot; the caller is
//! responsible for not running two generations against the same paths.

use crate::artifacts::{emit, ArtifactPaths};
use crate::core::{normalize, ExchangeInfo, SymbolTable};
use crate::log_generate;
use crate::SymbolError;

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Records in the exchange document
    pub records: usize,
    /// Tradable symbols written
    pub entries: usize,
    pub fingerprint: String,
    pub paths: ArtifactPaths,
    /// Set when the tradable set was empty; the artifacts are valid but empty
    pub empty_warning: bool,
}

/// Build and write both artifacts from an exchange metadata document
///
/// Malformed source data fails before anything is written.
pub fn generate(info: &ExchangeInfo, paths: &ArtifactPaths) -> Result<GenerationReport, SymbolError> {
    let set = normalize(&info.symbols)?;

    let empty_warning = set.is_empty();
    if empty_warning {
        log_generate!(
            tracing::Level::WARN,
            "No tradable symbols in {} records; writing empty artifacts",
            info.symbols.len()
        );
    }

    let table = SymbolTable::assign(set);
    let emission = emit(&table, paths)?;

    log_generate!(
        tracing::Level::INFO,
        "Generated {} symbol ids (fingerprint {})",
        emission.entries,
        &emission.fingerprint[..12.min(emission.fingerprint.len())]
    );

    Ok(GenerationReport {
        records: info.symbols.len(),
        entries: emission.entries,
        fingerprint: emission.fingerprint,
        paths: emission.paths,
        empty_warning,
    })
}
