//! Pre-generated lookup workloads
//!
//! Draws are made up front so RNG cost stays outside the timed loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default workload seed
pub const DEFAULT_SEED: u64 = 42;

/// Sequence of keys to look up, in order
#[derive(Debug, Clone)]
pub struct LookupWorkload {
    keys: Vec<Box<[u8]>>,
    draws: Vec<u32>,
}

impl LookupWorkload {
    /// `trials` uniform draws from `names`
    ///
    /// An empty name set yields an empty workload.
    pub fn uniform<I, S>(names: I, trials: usize, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<Box<[u8]>> = names
            .into_iter()
            .map(|name| Box::from(name.as_ref().as_bytes()))
            .collect();

        let draws = if keys.is_empty() {
            Vec::new()
        } else {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..trials).map(|_| rng.gen_range(0..keys.len()) as u32).collect()
        };

        Self { keys, draws }
    }

    /// Number of lookups
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Distinct keys drawn from
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Keys in draw order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.slice(0, self.draws.len())
    }

    /// Keys for draws `start..end`
    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> impl Iterator<Item = &[u8]> + '_ {
        self.draws[start..end].iter().map(|&i| &*self.keys[i as usize])
    }
}
