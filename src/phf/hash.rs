//! Seeded key hashing
//!
//! 64-bit FNV-1a over the key bytes, finalized with the murmur3 mixer and
//! split into a bucket selector `g` and displacement inputs `f1`, `f2`.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Per-key hash triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hashes {
    pub g: u32,
    pub f1: u32,
    pub f2: u32,
}

/// Hash `key` under `seed`; O(len), no allocation
#[inline]
pub fn hash(key: &[u8], seed: u64) -> Hashes {
    let mut h = FNV_OFFSET ^ seed;
    for &byte in key {
        h ^= byte as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    let h = fmix64(h);
    let f2 = fmix64(h ^ seed.rotate_left(32));
    Hashes {
        g: (h >> 32) as u32,
        f1: h as u32,
        f2: f2 as u32,
    }
}

/// Slot candidate for displacement pair `(d1, d2)`; reduce modulo table length
#[inline(always)]
pub const fn displace(f1: u32, f2: u32, d1: u32, d2: u32) -> u32 {
    d2.wrapping_add(f1.wrapping_mul(d1)).wrapping_add(f2)
}

#[inline(always)]
const fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}
