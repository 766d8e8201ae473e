//! Narrowed views of a runtime map
//!
//! A filtered map is a disposable artifact: a subset of `{symbol: id}` with
//! ids preserved, never fed back into generation.

use super::json_map::read_json_object;
use super::{ArtifactError, StagedFile};
use std::collections::BTreeMap;
use std::path::Path;

/// Key predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolFilter {
    /// Case-insensitive substring containment
    Contains { keyword: String },
    /// Starts with one of `bases`, contains `quote`, does not start with `quote`
    QuotedBase { bases: Vec<String>, quote: String },
}

impl SymbolFilter {
    pub fn contains(keyword: impl Into<String>) -> Self {
        Self::Contains {
            keyword: keyword.into(),
        }
    }

    pub fn matches(&self, symbol: &str) -> bool {
        let symbol = symbol.to_lowercase();
        match self {
            Self::Contains { keyword } => symbol.contains(&keyword.to_lowercase()),
            Self::QuotedBase { bases, quote } => {
                let quote = quote.to_lowercase();
                !symbol.starts_with(&quote)
                    && symbol.contains(&quote)
                    && bases.iter().any(|b| symbol.starts_with(&b.to_lowercase()))
            }
        }
    }
}

/// Key case in the filtered output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseTransform {
    #[default]
    Preserve,
    Upper,
}

impl CaseTransform {
    fn apply(self, key: &str) -> String {
        match self {
            Self::Preserve => key.to_string(),
            Self::Upper => key.to_uppercase(),
        }
    }
}

/// Subset of a runtime map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredSymbolMap {
    entries: BTreeMap<String, u32>,
}

impl FilteredSymbolMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.entries.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn render(&self) -> Result<String, ArtifactError> {
        let mut text = serde_json::to_string_pretty(&self.entries).map_err(ArtifactError::Render)?;
        text.push('\n');
        Ok(text)
    }
}

/// Keep entries whose key matches `filter`, optionally re-casing keys
pub fn filter_map(map: &BTreeMap<String, u32>, filter: &SymbolFilter, transform: CaseTransform) -> FilteredSymbolMap {
    let entries = map
        .iter()
        .filter(|(key, _)| filter.matches(key))
        .map(|(key, id)| (transform.apply(key), *id))
        .collect();
    FilteredSymbolMap { entries }
}

/// Filter a map artifact file into `output`
///
/// # Errors
/// `MissingInput` when `input` does not exist (the CLI maps this to exit 1).
pub fn filter_file(
    input: &Path,
    output: &Path,
    filter: &SymbolFilter,
    transform: CaseTransform,
) -> Result<FilteredSymbolMap, ArtifactError> {
    let map = read_json_object(input)?;
    let filtered = filter_map(&map, filter, transform);

    StagedFile::write(output, filtered.render()?.as_bytes())
        .and_then(StagedFile::commit)
        .map_err(ArtifactError::io(output))?;

    tracing::info!("Filtered {} symbols into {}", filtered.len(), output.display());
    Ok(filtered)
}
