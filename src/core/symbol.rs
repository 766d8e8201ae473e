//! Dense symbol ids
//!
//! A symbol's id is its index in the sorted, normalized symbol set, so ids
//! are contiguous in `[0, N)` and can index flat arrays directly.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    pub const UNKNOWN: Self = Self(u32::MAX);

    #[inline(always)]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Id as an array index
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        self.0 != Self::UNKNOWN.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
