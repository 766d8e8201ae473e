//! Symbol lookup seam
//!
//! Every lookup path (perfect hash, dynamic map, sorted table) implements
//! `SymbolResolver` so parsers and benchmarks stay generic over it.

use super::{SymbolId, SymbolTable};
use std::collections::HashMap;

/// Longest wire symbol accepted by `resolve_wire_symbol`
pub const MAX_SYMBOL_LEN: usize = 32;

/// Read-only `symbol bytes -> id` lookup
///
/// `None` is a lookup miss: a normal outcome the caller handles by rejecting
/// the message or falling back to an out-of-band path.
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, name: &[u8]) -> Option<SymbolId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: SymbolResolver + ?Sized> SymbolResolver for &R {
    #[inline]
    fn resolve(&self, name: &[u8]) -> Option<SymbolId> {
        (**self).resolve(name)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Naive dynamic map baseline (std `HashMap`, SipHash)
#[derive(Debug, Clone, Default)]
pub struct DynamicSymbolMap {
    map: HashMap<Box<[u8]>, SymbolId>,
}

impl DynamicSymbolMap {
    pub fn from_table(table: &SymbolTable) -> Self {
        let map = table
            .entries()
            .map(|(name, id)| (Box::<[u8]>::from(name.as_bytes()), id))
            .collect();
        Self { map }
    }
}

impl SymbolResolver for DynamicSymbolMap {
    #[inline]
    fn resolve(&self, name: &[u8]) -> Option<SymbolId> {
        self.map.get(name).copied()
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Resolve an exchange wire symbol (`"BTCUSDT"`) against lowercase keys
///
/// Lowercases into a stack buffer, so there is no heap allocation. Input
/// longer than `MAX_SYMBOL_LEN` is a miss.
#[inline]
pub fn resolve_wire_symbol<R: SymbolResolver + ?Sized>(resolver: &R, wire: &[u8]) -> Option<SymbolId> {
    if wire.is_empty() || wire.len() > MAX_SYMBOL_LEN {
        return None;
    }
    let mut buf = [0u8; MAX_SYMBOL_LEN];
    let lowered = &mut buf[..wire.len()];
    lowered.copy_from_slice(wire);
    lowered.make_ascii_lowercase();
    resolver.resolve(lowered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_table;

    #[test]
    fn test_dynamic_map_matches_table() {
        let table = sample_table();
        let map = DynamicSymbolMap::from_table(&table);
        assert_eq!(map.len(), table.len());
        for (name, id) in table.entries() {
            assert_eq!(map.resolve(name.as_bytes()), Some(id));
        }
        assert_eq!(map.resolve(b"BTCUSDT"), None);
    }

    #[test]
    fn test_resolve_wire_symbol_lowercases() {
        let table = sample_table();
        let expected = table.get("btcusdt");
        assert!(expected.is_some());
        assert_eq!(resolve_wire_symbol(&table, b"BTCUSDT"), expected);
        assert_eq!(resolve_wire_symbol(&table, b"btcusdt"), expected);
    }

    #[test]
    fn test_resolve_wire_symbol_rejects_bad_lengths() {
        let table = sample_table();
        assert_eq!(resolve_wire_symbol(&table, b""), None);
        assert_eq!(resolve_wire_symbol(&table, &[b'A'; MAX_SYMBOL_LEN + 1]), None);
    }
}
