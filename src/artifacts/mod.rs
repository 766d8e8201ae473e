//! Generated artifacts (cold path)
//!
//! - json_map: Runtime `{symbol: id}` JSON map
//! - gperf: Declarative perfect-hash source (gperf keyword file format)
//! - emitter: Writes both from one `SymbolTable`, all-or-nothing
//! - filter: Narrowed copies of a runtime map

pub mod emitter;
pub mod filter;
pub mod gperf;
pub mod json_map;
mod staged;

pub use emitter::{emit, verify_agreement, ArtifactPaths, EmissionReport};
pub use filter::{filter_file, filter_map, CaseTransform, FilteredSymbolMap, SymbolFilter};
pub use gperf::{PerfectHashSource, SourceDirectives};
pub use json_map::{load_json_map, read_json_object, render_json_map};
pub(crate) use staged::StagedFile;

use crate::core::TableError;
use std::path::PathBuf;

/// Artifact read/write errors
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON map {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render JSON map: {0}")]
    Render(#[source] serde_json::Error),

    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Input file does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("Artifacts disagree: {} pairs only in JSON map, {} only in hash source", .only_in_json.len(), .only_in_source.len())]
    Disagreement {
        only_in_json: Vec<(String, u32)>,
        only_in_source: Vec<(String, u32)>,
    },

    #[error("Invalid symbol table: {0}")]
    Table(#[from] TableError),
}

impl ArtifactError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
