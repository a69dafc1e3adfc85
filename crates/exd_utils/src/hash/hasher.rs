//! `FixedHashState` and `NoOpHashState`.
//!
//! Containers that take part in serialization hash with a fixed seed, so
//! that iterating an unchanged map always yields the same order and the
//! encoded bytes stay stable between passes and between processes.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const SEED: FixedState = FixedState::with_seed(0x51D1_C7A0_E3B2_9F47);

/// The hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A `foldhash` state with a constant seed.
///
/// Two maps filled with the same keys in the same order iterate in
/// the same order, in every run of the program.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use exd_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("key"), FixedHashState.hash_one("key"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        SEED.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHashState

/// Passes an already well-distributed `u64` through unchanged.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Build state for [`NoOpHasher`], used for keys such as `TypeId`
/// that are hashes already.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}
