//! Perfect-hash table compiler (cold path)
//!
//! Hash-and-displace (CHD) construction: keys are grouped into buckets of
//! about `lambda` keys by `g`, buckets are placed largest-first, and each
//! bucket searches displacement pairs `(d1, d2)` until all of its keys land
//! in distinct free slots. A seed that leaves some bucket unplaceable is
//! replaced by the next seed of a fixed sequence, so output is deterministic.

use super::hash::{displace, hash, Hashes};
use super::table::{PerfectHashTable, SymbolEntry};
use crate::artifacts::PerfectHashSource;
use crate::core::SymbolId;
use bitvec::prelude::*;
use std::collections::HashSet;

/// Default average keys per displacement bucket
pub const DEFAULT_LAMBDA: usize = 5;

/// Default number of seeds tried before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

const DEFAULT_SEED: u64 = 0x5eed_cafe_f00d_d00d;

/// Turns a perfect-hash source description into a lookup engine
pub trait HashTableCompiler {
    fn compile(&self, source: &PerfectHashSource) -> Result<PerfectHashTable, CompileError>;
}

/// In-crate CHD construction
#[derive(Debug, Clone)]
pub struct DisplacementCompiler {
    lambda: usize,
    max_attempts: u32,
    initial_seed: u64,
}

impl Default for DisplacementCompiler {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_seed: DEFAULT_SEED,
        }
    }
}

impl DisplacementCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Average keys per bucket (clamped to at least 1)
    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda.max(1);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.initial_seed = seed;
        self
    }

    /// Build a table over `(symbol, id)` entries
    pub fn build(&self, entries: &[(String, SymbolId)]) -> Result<PerfectHashTable, CompileError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for (name, _) in entries {
            if !seen.insert(name.as_str()) {
                return Err(CompileError::DuplicateKey(name.clone()));
            }
        }
        if entries.len() > u32::MAX as usize {
            return Err(CompileError::TooManyKeys(entries.len()));
        }
        if entries.is_empty() {
            return Ok(PerfectHashTable::empty());
        }

        let mut seed = self.initial_seed;
        for attempt in 1..=self.max_attempts {
            if let Some(placement) = self.try_seed(entries, seed) {
                tracing::info!(
                    "Perfect hash built: {} keys, {} buckets, seed {:#x} (attempt {})",
                    entries.len(),
                    placement.displacements.len(),
                    seed,
                    attempt
                );
                let slots: Vec<SymbolEntry> = placement
                    .slots
                    .into_iter()
                    .map(|key| SymbolEntry {
                        name: entries[key].0.clone().into_boxed_str(),
                        id: entries[key].1,
                    })
                    .collect();
                return Ok(PerfectHashTable::from_parts(
                    seed,
                    placement.displacements.into_boxed_slice(),
                    slots.into_boxed_slice(),
                ));
            }
            tracing::debug!("Seed {:#x} failed to place all buckets, retrying", seed);
            seed = splitmix64(seed);
        }

        Err(CompileError::SeedsExhausted {
            attempts: self.max_attempts,
        })
    }

    /// One placement attempt; `None` if some bucket cannot be placed
    fn try_seed(&self, entries: &[(String, SymbolId)], seed: u64) -> Option<Placement> {
        let n = entries.len();
        let hashes: Vec<Hashes> = entries.iter().map(|(name, _)| hash(name.as_bytes(), seed)).collect();

        let bucket_count = (n + self.lambda - 1) / self.lambda;
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); bucket_count];
        for (key, h) in hashes.iter().enumerate() {
            buckets[h.g as usize % bucket_count].push(key);
        }

        // Largest buckets first; stable sort keeps ties in bucket order
        let mut order: Vec<usize> = (0..bucket_count).collect();
        order.sort_by(|a, b| buckets[*b].len().cmp(&buckets[*a].len()));

        let mut displacements = vec![(0u32, 0u32); bucket_count];
        let mut slot_key: Vec<usize> = vec![usize::MAX; n];
        let mut occupied = bitvec![0; n];

        // Per-candidate scratch: a slot is taken within the current trial
        // iff its generation matches
        let mut trial_gen = vec![0u64; n];
        let mut generation = 0u64;
        let mut pending: Vec<(usize, usize)> = Vec::with_capacity(self.lambda * 4);

        'buckets: for &bucket in &order {
            let keys = &buckets[bucket];
            if keys.is_empty() {
                continue;
            }
            for d1 in 0..n as u32 {
                'candidates: for d2 in 0..n as u32 {
                    pending.clear();
                    generation += 1;
                    for &key in keys {
                        let h = hashes[key];
                        let slot = displace(h.f1, h.f2, d1, d2) as usize % n;
                        if occupied[slot] || trial_gen[slot] == generation {
                            continue 'candidates;
                        }
                        trial_gen[slot] = generation;
                        pending.push((slot, key));
                    }

                    displacements[bucket] = (d1, d2);
                    for &(slot, key) in &pending {
                        occupied.set(slot, true);
                        slot_key[slot] = key;
                    }
                    continue 'buckets;
                }
            }
            return None;
        }

        Some(Placement {
            displacements,
            slots: slot_key,
        })
    }
}

impl HashTableCompiler for DisplacementCompiler {
    fn compile(&self, source: &PerfectHashSource) -> Result<PerfectHashTable, CompileError> {
        self.build(&source.entries)
    }
}

struct Placement {
    displacements: Vec<(u32, u32)>,
    /// slots[i] = index into the entry list
    slots: Vec<usize>,
}

#[inline]
fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Perfect-hash construction errors
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Duplicate key in source: {0}")]
    DuplicateKey(String),

    #[error("Too many keys: {0}")]
    TooManyKeys(usize),

    #[error("No collision-free placement found after {attempts} seeds")]
    SeedsExhausted { attempts: u32 },
}
