//! Perfect-hash lookup engine (hot path)
//!
//! Built once by a `HashTableCompiler`, immutable afterwards. A lookup is one
//! hash over the candidate bytes, one displacement fetch, one slot fetch and
//! one byte comparison. No probing, no chaining, no allocation.

use super::hash::{displace, hash};
use crate::core::{SymbolId, SymbolResolver};

/// One `(symbol, id)` slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: Box<str>,
    pub id: SymbolId,
}

/// Minimal perfect-hash table: exactly one slot per key
#[derive(Debug, Clone)]
pub struct PerfectHashTable {
    seed: u64,
    displacements: Box<[(u32, u32)]>,
    slots: Box<[SymbolEntry]>,
}

impl PerfectHashTable {
    pub(crate) fn from_parts(
        seed: u64,
        displacements: Box<[(u32, u32)]>,
        slots: Box<[SymbolEntry]>,
    ) -> Self {
        Self {
            seed,
            displacements,
            slots,
        }
    }

    /// Table with no keys; every lookup misses
    pub fn empty() -> Self {
        Self::from_parts(0, Box::new([]), Box::new([]))
    }

    /// Look up a candidate symbol
    ///
    /// Keys outside the training set may hash onto any slot; the stored key
    /// comparison turns that into a miss, never a false id.
    #[inline]
    pub fn lookup(&self, key: &[u8]) -> Option<SymbolId> {
        let entry = self.slots.get(self.slot_index(key)?)?;
        if entry.name.as_bytes() == key {
            Some(entry.id)
        } else {
            None
        }
    }

    #[inline]
    pub fn lookup_str(&self, key: &str) -> Option<SymbolId> {
        self.lookup(key.as_bytes())
    }

    /// Slot the hash function assigns to `key`, in `[0, N)`
    #[inline(always)]
    fn slot_index(&self, key: &[u8]) -> Option<usize> {
        if self.slots.is_empty() || self.displacements.is_empty() {
            return None;
        }
        let h = hash(key, self.seed);
        let (d1, d2) = self.displacements[h.g as usize % self.displacements.len()];
        Some(displace(h.f1, h.f2, d1, d2) as usize % self.slots.len())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of displacement buckets
    pub fn buckets(&self) -> usize {
        self.displacements.len()
    }

    /// Slots in hash order
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &SymbolEntry> {
        self.slots.iter()
    }
}

impl SymbolResolver for PerfectHashTable {
    #[inline]
    fn resolve(&self, name: &[u8]) -> Option<SymbolId> {
        self.lookup(name)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}
