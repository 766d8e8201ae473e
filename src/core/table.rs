//! Symbol table: dense id assignment
//!
//! `id(symbol)` is the symbol's index in the normalized (sorted) sequence.
//! No hashing happens here; the sequence order alone fixes every id, so the
//! same symbol universe always yields the same table.

use super::{NormalizedSymbolSet, SymbolId, SymbolResolver};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// The `symbol -> id` relation, stored as names sorted by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    /// names[id] = symbol; sorted ascending, so id order == byte order
    names: Vec<Box<str>>,
}

impl SymbolTable {
    /// Assign ids by position in the normalized sequence
    pub fn assign(set: NormalizedSymbolSet) -> Self {
        Self {
            names: set.into_vec().into_iter().map(String::into_boxed_str).collect(),
        }
    }

    /// Rebuild a table from `(symbol, id)` pairs, e.g. a loaded artifact
    ///
    /// # Errors
    /// Fails unless the pairs form a bijection onto `[0, N)` with ids in
    /// sorted-symbol order.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, SymbolId)>,
        S: Into<String>,
    {
        let mut pairs: Vec<(String, SymbolId)> =
            pairs.into_iter().map(|(s, id)| (s.into(), id)).collect();
        let n = pairs.len();
        pairs.sort_unstable_by_key(|(_, id)| *id);

        for (expected, (name, id)) in pairs.iter().enumerate() {
            if id.index() >= n {
                return Err(TableError::IdOutOfRange { symbol: name.clone(), id: id.as_raw(), len: n });
            }
            if id.index() != expected {
                return Err(TableError::DuplicateId(id.as_raw()));
            }
        }

        let mut seen = HashSet::with_capacity(n);
        for (name, _) in &pairs {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateSymbol(name.clone()));
            }
        }

        if let Some(w) = pairs.windows(2).find(|w| w[0].0 > w[1].0) {
            return Err(TableError::OutOfOrder(w[1].0.clone()));
        }

        Ok(Self {
            names: pairs.into_iter().map(|(s, _)| s.into_boxed_str()).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(symbol, id)` pairs in id order
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&str, SymbolId)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_ref(), SymbolId::from_raw(i as u32)))
    }

    /// Binary search over the sorted names
    pub fn get(&self, symbol: &str) -> Option<SymbolId> {
        self.names
            .binary_search_by(|probe| probe.as_ref().cmp(symbol))
            .ok()
            .map(|i| SymbolId::from_raw(i as u32))
    }

    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.names.get(id.index()).map(AsRef::as_ref)
    }

    /// SHA-256 over the canonical `symbol\tid\n` lines
    ///
    /// Two artifacts derived from the same table share this fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, id) in self.entries() {
            hasher.update(name.as_bytes());
            hasher.update(b"\t");
            hasher.update(id.as_raw().to_string().as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}

impl SymbolResolver for SymbolTable {
    #[inline]
    fn resolve(&self, name: &[u8]) -> Option<SymbolId> {
        self.names
            .binary_search_by(|probe| probe.as_bytes().cmp(name))
            .ok()
            .map(|i| SymbolId::from_raw(i as u32))
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

/// Symbol table validation errors
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(u32),

    #[error("Id {id} for {symbol} outside [0, {len})")]
    IdOutOfRange { symbol: String, id: u32, len: usize },

    #[error("Ids not in sorted symbol order at {0}")]
    OutOfOrder(String),
}
