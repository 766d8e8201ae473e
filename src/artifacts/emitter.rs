//! Dual-artifact emitter
//!
//! Serializes one `SymbolTable` as both the runtime JSON map and the
//! perfect-hash source. Both are rendered in memory and staged next to their
//! destinations before either is renamed into place, so a failed run leaves
//! the previous artifacts untouched. If the second rename fails, the first
//! artifact is restored from its previous contents.

use super::gperf::PerfectHashSource;
use super::json_map::{read_json_object, render_json_map};
use super::{ArtifactError, StagedFile};
use crate::core::SymbolTable;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

/// Output locations for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub json_map: PathBuf,
    pub perfect_hash_source: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            json_map: PathBuf::from("symbols.json"),
            perfect_hash_source: PathBuf::from("symbol_keywords.gperf"),
        }
    }
}

/// Summary of a successful emission
#[derive(Debug, Clone)]
pub struct EmissionReport {
    pub entries: usize,
    /// `SymbolTable::fingerprint` shared by both artifacts
    pub fingerprint: String,
    pub paths: ArtifactPaths,
}

/// Write both artifacts for `table`, replacing any previous ones
pub fn emit(table: &SymbolTable, paths: &ArtifactPaths) -> Result<EmissionReport, ArtifactError> {
    let json = render_json_map(table)?;
    let source = PerfectHashSource::from_table(table).render();

    let staged_json = StagedFile::write(&paths.json_map, json.as_bytes())
        .map_err(ArtifactError::io(&paths.json_map))?;
    let staged_source = StagedFile::write(&paths.perfect_hash_source, source.as_bytes())
        .map_err(ArtifactError::io(&paths.perfect_hash_source))?;

    let previous_json = read_existing(&paths.json_map).map_err(ArtifactError::io(&paths.json_map))?;

    staged_json.commit().map_err(ArtifactError::io(&paths.json_map))?;
    if let Err(source) = staged_source.commit() {
        restore(&paths.json_map, previous_json.as_deref());
        return Err(ArtifactError::Io {
            path: paths.perfect_hash_source.clone(),
            source,
        });
    }

    tracing::info!(
        "Wrote {} entries to {} and {}",
        table.len(),
        paths.json_map.display(),
        paths.perfect_hash_source.display()
    );

    Ok(EmissionReport {
        entries: table.len(),
        fingerprint: table.fingerprint(),
        paths: paths.clone(),
    })
}

fn read_existing(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Put `path` back to `previous` (absent when `None`) after a failed commit
fn restore(path: &Path, previous: Option<&[u8]>) {
    let result = match previous {
        Some(contents) => StagedFile::write(path, contents).and_then(StagedFile::commit),
        None => std::fs::remove_file(path),
    };
    match result {
        Ok(()) => tracing::warn!("Restored {} after failed commit", path.display()),
        Err(e) => tracing::error!(
            "Failed to restore {}: {}; artifacts no longer agree",
            path.display(),
            e
        ),
    }
}

/// Check that both artifact files hold the same `(symbol, id)` set
///
/// Returns the number of shared pairs. A symbol repeated inside the JSON map
/// collapses to its last value before the comparison.
pub fn verify_agreement(json_map: &Path, perfect_hash_source: &Path) -> Result<usize, ArtifactError> {
    let json_pairs: BTreeSet<(String, u32)> = read_json_object(json_map)?.into_iter().collect();

    if !perfect_hash_source.exists() {
        return Err(ArtifactError::MissingInput(perfect_hash_source.to_path_buf()));
    }
    let text = std::fs::read_to_string(perfect_hash_source).map_err(ArtifactError::io(perfect_hash_source))?;
    let source_pairs: BTreeSet<(String, u32)> = PerfectHashSource::parse(&text)?
        .entries
        .into_iter()
        .map(|(name, id)| (name, id.as_raw()))
        .collect();

    if json_pairs != source_pairs {
        return Err(ArtifactError::Disagreement {
            only_in_json: json_pairs.difference(&source_pairs).cloned().collect(),
            only_in_source: source_pairs.difference(&json_pairs).cloned().collect(),
        });
    }
    Ok(json_pairs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::load_json_map;
    use crate::test_utils::sample_table;

    fn paths_in(dir: &Path) -> ArtifactPaths {
        ArtifactPaths {
            json_map: dir.join("symbols.json"),
            perfect_hash_source: dir.join("symbol_keywords.gperf"),
        }
    }

    #[test]
    fn test_emit_writes_agreeing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let table = sample_table();

        let report = emit(&table, &paths).unwrap();
        assert_eq!(report.entries, table.len());
        assert_eq!(report.fingerprint, table.fingerprint());
        assert_eq!(verify_agreement(&paths.json_map, &paths.perfect_hash_source).unwrap(), table.len());
        assert_eq!(load_json_map(&paths.json_map).unwrap(), table);
    }

    #[test]
    fn test_emit_overwrites_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        emit(&sample_table(), &paths).unwrap();

        let small = SymbolTable::from_pairs(vec![("ethbtc", crate::core::SymbolId::from_raw(0))]).unwrap();
        emit(&small, &paths).unwrap();
        assert_eq!(load_json_map(&paths.json_map).unwrap(), small);
        assert_eq!(verify_agreement(&paths.json_map, &paths.perfect_hash_source).unwrap(), 1);
    }

    #[test]
    fn test_emit_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let report = emit(&SymbolTable::default(), &paths).unwrap();
        assert_eq!(report.entries, 0);
        assert_eq!(std::fs::read_to_string(&paths.json_map).unwrap(), "{}\n");
        assert_eq!(verify_agreement(&paths.json_map, &paths.perfect_hash_source).unwrap(), 0);
    }

    #[test]
    fn test_failed_stage_leaves_previous_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        emit(&sample_table(), &paths).unwrap();
        let before = std::fs::read_to_string(&paths.json_map).unwrap();

        // A plain file in place of the source's parent directory makes staging fail
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "not a directory").unwrap();
        let bad = ArtifactPaths {
            json_map: paths.json_map.clone(),
            perfect_hash_source: blocker.join("symbol_keywords.gperf"),
        };
        assert!(emit(&SymbolTable::default(), &bad).is_err());
        assert_eq!(std::fs::read_to_string(&paths.json_map).unwrap(), before);
        assert!(!dir.path().join(".symbols.json.tmp").exists());
    }

    #[test]
    fn test_failed_second_commit_restores_json_map() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        emit(&sample_table(), &paths).unwrap();
        let before = std::fs::read_to_string(&paths.json_map).unwrap();

        // Staging succeeds, but the rename onto a non-empty directory fails
        let occupied = dir.path().join("occupied");
        std::fs::create_dir(&occupied).unwrap();
        std::fs::write(occupied.join("keep"), "x").unwrap();
        let bad = ArtifactPaths {
            json_map: paths.json_map.clone(),
            perfect_hash_source: occupied.clone(),
        };
        assert!(matches!(emit(&SymbolTable::default(), &bad), Err(ArtifactError::Io { .. })));
        assert_eq!(std::fs::read_to_string(&paths.json_map).unwrap(), before);
        assert!(!dir.path().join(".occupied.tmp").exists());
    }

    #[test]
    fn test_failed_second_commit_removes_new_json_map() {
        let dir = tempfile::tempdir().unwrap();
        let occupied = dir.path().join("occupied");
        std::fs::create_dir(&occupied).unwrap();
        std::fs::write(occupied.join("keep"), "x").unwrap();
        let bad = ArtifactPaths {
            json_map: dir.path().join("symbols.json"),
            perfect_hash_source: occupied,
        };
        assert!(emit(&sample_table(), &bad).is_err());
        assert!(!bad.json_map.exists());
    }

    #[test]
    fn test_verify_detects_disagreement() {
        let dir = tempfile::tempdir().unwrap();
        let paths = paths_in(dir.path());
        let table = sample_table();
        emit(&table, &paths).unwrap();
        let btc = table.get("btcusdt").unwrap();
        std::fs::write(&paths.json_map, format!(r#"{{"btcusdt": {}}}"#, btc)).unwrap();
        match verify_agreement(&paths.json_map, &paths.perfect_hash_source) {
            Err(ArtifactError::Disagreement { only_in_json, only_in_source }) => {
                assert!(only_in_json.is_empty());
                assert_eq!(only_in_source.len(), table.len() - 1);
            }
            other => panic!("expected disagreement, got {:?}", other),
        }
    }
}
