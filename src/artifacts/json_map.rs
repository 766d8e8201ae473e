//! Runtime map artifact
//!
//! UTF-8 JSON object `{"btcusdt": 0, "ethusdt": 1, ...}`, 2-space indent,
//! keys in id order. Consumed by debug tooling and the dynamic-map baseline.

use super::ArtifactError;
use crate::core::{SymbolId, SymbolTable};
use std::collections::BTreeMap;
use std::path::Path;

/// Render the full map; keys sort lexicographically, which is id order
pub fn render_json_map(table: &SymbolTable) -> Result<String, ArtifactError> {
    let map: BTreeMap<&str, u32> = table.entries().map(|(name, id)| (name, id.as_raw())).collect();
    let mut text = serde_json::to_string_pretty(&map).map_err(ArtifactError::Render)?;
    text.push('\n');
    Ok(text)
}

/// Read any `{string: non-negative integer}` JSON object
///
/// A key repeated in the file keeps only its last value, so a hand-edited map
/// with a duplicate symbol is not detected here. Maps written by
/// `render_json_map` never repeat a key.
///
/// # Errors
/// `MissingInput` if the file does not exist, `Json` if it is not such an
/// object.
pub fn read_json_object(path: &Path) -> Result<BTreeMap<String, u32>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::MissingInput(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path).map_err(ArtifactError::io(path))?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a runtime map artifact back into a validated `SymbolTable`
pub fn load_json_map(path: &Path) -> Result<SymbolTable, ArtifactError> {
    let object = read_json_object(path)?;
    let table = SymbolTable::from_pairs(
        object
            .into_iter()
            .map(|(name, id)| (name, SymbolId::from_raw(id))),
    )?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_table;

    #[test]
    fn test_render_format() {
        let table = SymbolTable::from_pairs(vec![
            ("btcusdt", SymbolId::from_raw(0)),
            ("ethusdt", SymbolId::from_raw(1)),
        ])
        .unwrap();
        assert_eq!(
            render_json_map(&table).unwrap(),
            "{\n  \"btcusdt\": 0,\n  \"ethusdt\": 1\n}\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_json_map(&SymbolTable::default()).unwrap(), "{}\n");
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symbols.json");
        let table = sample_table();
        std::fs::write(&path, render_json_map(&table).unwrap()).unwrap();
        assert_eq!(load_json_map(&path).unwrap(), table);
    }

    #[test]
    fn test_missing_and_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(read_json_object(&missing), Err(ArtifactError::MissingInput(_))));

        let negative = dir.path().join("neg.json");
        std::fs::write(&negative, r#"{"btcusdt": -1}"#).unwrap();
        assert!(matches!(read_json_object(&negative), Err(ArtifactError::Json { .. })));

        let repeated = dir.path().join("repeated.json");
        std::fs::write(&repeated, r#"{"btcusdt": 0, "btcusdt": 1}"#).unwrap();
        assert_eq!(read_json_object(&repeated).unwrap().get("btcusdt"), Some(&1));

        let gap = dir.path().join("gap.json");
        std::fs::write(&gap, r#"{"btcusdt": 0, "ethusdt": 5}"#).unwrap();
        assert!(matches!(load_json_map(&gap), Err(ArtifactError::Table(_))));
    }
}
