//! Seed hashing.
//!
//! The assigner only needs `&str -> u32`. Anything with that shape can be
//! plugged in; [`Fnv1a`] is what you get by default.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Maps a seed string to a `u32`.
///
/// Implementations must be deterministic and side-effect free. Only the low
/// two decimal digits of the output pick a bucket, so those are the digits
/// that need to be evenly spread.
pub trait SeedHasher: Send + Sync {
    /// Hash `seed`.
    fn hash(&self, seed: &str) -> u32;
}

impl<F> SeedHasher for F
where
    F: Fn(&str) -> u32 + Send + Sync,
{
    fn hash(&self, seed: &str) -> u32 {
        self(seed)
    }
}

/// 32-bit FNV-1a over the UTF-8 bytes of the seed.
///
/// Existing assignments depend on this staying bit-for-bit identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1a;

impl SeedHasher for Fnv1a {
    fn hash(&self, seed: &str) -> u32 {
        fnv1a_32(seed)
    }
}

/// Compute the 32-bit FNV-1a hash of `seed`.
#[must_use]
pub fn fnv1a_32(seed: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in seed.as_bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
