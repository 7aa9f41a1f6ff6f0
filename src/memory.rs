//! Cost model deciding between the dense and sparse representations.
//!
//! A bit vector spanning `[min, max]` costs about `(max - min) / 8` bytes. A
//! hash set holding `len` keys is estimated at
//! `max(MINIMUM_HASH_SET_CAPACITY, len) * HASH_SET_OCCUPANCY_OVERHEAD * size_of::<T>()`
//! bytes before it exists, and at `capacity * size_of::<T>()` once it does.
//!
//! A transition only happens when the other representation would be smaller
//! by at least [`HYSTERESIS_FACTOR`]. Memory therefore never exceeds twice the
//! better representation, and inserts near the crossover point do not flip the
//! set back and forth.
//!
//! All arithmetic is done in `u64` with saturation so the widest key type
//! cannot overflow it.
//!
//! # Examples
//!
//! ```rust
//! use likely_dense::memory;
//!
//! // {0, 1, 2, 1_000_000}: a 125 KB bit vector against a ~96 byte hash set.
//! assert!(memory::should_become_sparse::<u32>(4, 0, 1_000_000));
//!
//! // {4000, 4002, 4003}: the bit vector rounds down to zero bytes.
//! assert!(!memory::should_become_sparse::<u32>(3, 4_000, 4_003));
//! ```

use crate::index::UnsignedIndex;

/// Capacity slack of a hash set kept at roughly 50% occupancy.
pub const HASH_SET_OCCUPANCY_OVERHEAD: u64 = 3;

/// Smallest capacity assumed for a freshly built hash set.
pub const MINIMUM_HASH_SET_CAPACITY: u64 = 8;

/// Required memory ratio before switching representation.
pub const HYSTERESIS_FACTOR: u64 = 2;

#[inline]
fn key_size<T>() -> u64 {
    std::mem::size_of::<T>() as u64
}

/// Bytes needed by a bit vector covering `[min, max]`.
#[inline]
#[must_use]
pub fn bit_vector_bytes<T: UnsignedIndex>(min: T, max: T) -> u64 {
    debug_assert!(min <= max);
    (max.to_u64() - min.to_u64()) / 8
}

/// Bytes held by an existing hash set with the given capacity.
#[inline]
#[must_use]
pub fn hash_set_bytes<T: UnsignedIndex>(capacity: usize) -> u64 {
    (capacity as u64).saturating_mul(key_size::<T>())
}

/// Bytes a hash set holding `len` keys is expected to need.
#[inline]
#[must_use]
pub fn estimated_hash_set_bytes<T: UnsignedIndex>(len: usize) -> u64 {
    (len as u64)
        .max(MINIMUM_HASH_SET_CAPACITY)
        .saturating_mul(HASH_SET_OCCUPANCY_OVERHEAD)
        .saturating_mul(key_size::<T>())
}

/// Returns `true` if a sparse set with the given capacity and bounds should
/// be rebuilt as a bit vector.
#[inline]
#[must_use]
pub fn should_become_dense<T: UnsignedIndex>(hash_set_capacity: usize, min: T, max: T) -> bool {
    bit_vector_bytes(min, max).saturating_mul(HYSTERESIS_FACTOR)
        < hash_set_bytes::<T>(hash_set_capacity)
}

/// Returns `true` if a dense set about to hold `len` keys within
/// `[min, max]` should be rebuilt as a hash set.
#[inline]
#[must_use]
pub fn should_become_sparse<T: UnsignedIndex>(len: usize, min: T, max: T) -> bool {
    estimated_hash_set_bytes::<T>(len).saturating_mul(HYSTERESIS_FACTOR)
        < bit_vector_bytes(min, max)
}
