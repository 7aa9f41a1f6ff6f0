//! Adaptive set of unsigned integers.
//!
//! This module provides [`AdaptiveUnsignedSet`], a set of unsigned integer keys
//! that are usually clustered (object identifiers, indices into an array) but
//! may occasionally be spread over a wide range.
//!
//! # Overview
//!
//! The set holds exactly one of two representations at any time:
//!
//! - **Dense**: a [`BitVector`] plus the smallest and largest member. The bit at
//!   offset `v - min` is set when `v` is a member, so `{4000, 4002, 4003}` is
//!   stored as the bits `1101` with a minimum of `4000`.
//! - **Sparse**: a hash set of the raw values.
//!
//! The set switches representation whenever doing so would at least halve its
//! memory use (see [`memory`](crate::memory)). It therefore never uses more
//! than about twice the memory of the better representation, and it does not
//! ping-pong between the two when inserts hover around the crossover point.
//!
//! # Time Complexity
//!
//! | Operation    | Dense               | Sparse              |
//! |--------------|---------------------|---------------------|
//! | `contains`   | O(1)                | O(1) expected       |
//! | `insert`     | O(1) amortized      | O(1) amortized      |
//! | `len`        | O(1)                | O(1)                |
//! | `iter`       | O(span / 64 + n)    | O(capacity)         |
//! | `memory_use` | O(1)                | O(1)                |
//! | `check`      | O(span / 64 + n)    | O(capacity)         |
//!
//! A representation transition costs O(n) but only happens when it halves
//! memory use, so a sequence of N inserts does O(N) transition work in total.
//!
//! # State Transitions
//!
//! ```text
//!                 insert far outside [min, max]
//!                 (hash set < bit vector / 2)
//!      Dense ──────────────────────────────────► Sparse
//!        ▲                                          │
//!        │   insert filling the span                │
//!        │   (bit vector < hash set / 2)            │
//!        └──────────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use likely_dense::{AdaptiveUnsignedSet, Representation};
//!
//! let mut set: AdaptiveUnsignedSet<u32> = AdaptiveUnsignedSet::new();
//! assert!(set.insert(4000));
//! assert!(set.insert(4002));
//! assert!(set.insert(4003));
//! assert!(!set.insert(4003));
//!
//! assert_eq!(set.representation(), Representation::Dense);
//! assert!(set.contains(4002));
//! assert!(!set.contains(4001));
//!
//! let members: Vec<u32> = set.iter().collect();
//! assert_eq!(members, vec![4000, 4002, 4003]);
//! ```

use std::collections::HashSet;
use std::hash::BuildHasher;

use crate::bit_vector::BitVector;
use crate::error::ValidationError;
use crate::index::UnsignedIndex;
use crate::iter::Iter;
use crate::memory;

// =============================================================================
// Hash Builder Type Alias
// =============================================================================

/// Hash builder used by the sparse representation.
///
/// With the `ahash` feature this is `ahash::RandomState`. Otherwise, with the
/// `fxhash` feature (enabled by default), it is `rustc_hash::FxBuildHasher`.
/// With neither feature it falls back to the standard library's `RandomState`.
#[cfg(feature = "ahash")]
pub type DefaultHashBuilder = ahash::RandomState;

#[cfg(all(feature = "fxhash", not(feature = "ahash")))]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

// =============================================================================
// Representation
// =============================================================================

/// The representation currently used by an [`AdaptiveUnsignedSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Bit vector offset by the tracked minimum.
    Dense,
    /// Hash set of raw values.
    Sparse,
}

impl std::fmt::Display for Representation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dense => formatter.write_str("dense"),
            Self::Sparse => formatter.write_str("sparse"),
        }
    }
}

/// Live storage. Replacing the whole value is the only way to change
/// representation, so the tag can never disagree with the payload.
enum Storage<T, S> {
    Dense { bits: BitVector, len: usize },
    Sparse(HashSet<T, S>),
}

// =============================================================================
// AdaptiveUnsignedSet
// =============================================================================

/// A set of unsigned integers that adapts its representation to the data.
///
/// See the [crate documentation](crate) for an overview.
///
/// The set is insert-only and move-only: it implements neither `Clone` nor a
/// removal operation.
///
/// # Reserved Values
///
/// The two largest values of `T` (`T::MAX` and `T::MAX - 1`) are the empty and
/// deleted markers of the hash-table convention used by the sparse side and
/// must never be inserted or queried. Debug builds assert this; release builds
/// give unspecified results.
///
/// # Type Parameters
///
/// * `T` - The key type: `u8`, `u16`, `u32`, `u64` or `usize`.
/// * `S` - The hash builder of the sparse representation.
pub struct AdaptiveUnsignedSet<T: UnsignedIndex, S = DefaultHashBuilder> {
    storage: Storage<T, S>,
    /// Smallest member; meaningful only when non-empty.
    min: T,
    /// Largest member; meaningful only when non-empty.
    max: T,
}

impl<T: UnsignedIndex> AdaptiveUnsignedSet<T, DefaultHashBuilder> {
    /// Creates an empty set in the dense representation.
    ///
    /// Does not allocate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use likely_dense::AdaptiveUnsignedSet;
    ///
    /// let set: AdaptiveUnsignedSet<u32> = AdaptiveUnsignedSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher_type()
    }
}

impl<T: UnsignedIndex, S> AdaptiveUnsignedSet<T, S> {
    /// Creates an empty set whose sparse representation will use `S`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use likely_dense::AdaptiveUnsignedSet;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let mut set = AdaptiveUnsignedSet::<u64, RandomState>::with_hasher_type();
    /// set.insert(7);
    /// assert!(set.contains(7));
    /// ```
    #[inline]
    #[must_use]
    pub fn with_hasher_type() -> Self {
        Self {
            storage: Storage::Dense {
                bits: BitVector::new(),
                len: 0,
            },
            min: T::ZERO,
            max: T::ZERO,
        }
    }

    /// Returns the number of members.
    ///
    /// # Complexity
    ///
    /// O(1) in both representations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Dense { len, .. } => *len,
            Storage::Sparse(set) => set.len(),
        }
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the representation currently in use.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use likely_dense::{AdaptiveUnsignedSet, Representation};
    ///
    /// let mut set: AdaptiveUnsignedSet<u32> = [0, 1, 2].into_iter().collect();
    /// assert_eq!(set.representation(), Representation::Dense);
    ///
    /// set.insert(1_000_000);
    /// assert_eq!(set.representation(), Representation::Sparse);
    /// ```
    #[inline]
    #[must_use]
    pub const fn representation(&self) -> Representation {
        match self.storage {
            Storage::Dense { .. } => Representation::Dense,
            Storage::Sparse(_) => Representation::Sparse,
        }
    }

    /// Returns the smallest member, or `None` if the set is empty.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<T> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Returns the largest member, or `None` if the set is empty.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<T> {
        (!self.is_empty()).then_some(self.max)
    }

    /// Returns the number of bytes used by the set.
    ///
    /// This is the size of the set itself plus its heap storage: the spilled
    /// bit vector words in the dense representation, or
    /// `capacity * size_of::<T>()` in the sparse one. Intended for
    /// instrumentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use likely_dense::AdaptiveUnsignedSet;
    ///
    /// let mut set: AdaptiveUnsignedSet<u32> = AdaptiveUnsignedSet::new();
    /// let empty = set.memory_use();
    ///
    /// // 64 bits fit inline.
    /// set.extend(0..64);
    /// assert_eq!(set.memory_use(), empty);
    ///
    /// set.insert(64);
    /// assert!(set.memory_use() > empty);
    /// ```
    #[must_use]
    pub fn memory_use(&self) -> usize {
        let out_of_line = match &self.storage {
            Storage::Dense { bits, .. } => bits.out_of_line_memory_use(),
            Storage::Sparse(set) => set.capacity() * std::mem::size_of::<T>(),
        };
        std::mem::size_of::<Self>() + out_of_line
    }

    /// Returns an iterator over the members.
    ///
    /// The dense representation yields members in ascending order; the sparse
    /// representation yields them in unspecified order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use likely_dense::AdaptiveUnsignedSet;
    ///
    /// let set: AdaptiveUnsignedSet<u16> = [12, 10, 11].into_iter().collect();
    /// let members: Vec<u16> = set.iter().collect();
    /// assert_eq!(members, vec![10, 11, 12]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, S> {
        match &self.storage {
            Storage::Dense { bits, len } => Iter::dense(bits.iter(), self.min, *len),
            Storage::Sparse(set) => Iter::sparse(set, self.min),
        }
    }
}

impl<T: UnsignedIndex, S: BuildHasher + Default> AdaptiveUnsignedSet<T, S> {
    /// Returns `true` if `value` is a member.
    ///
    /// `value` must not be a reserved marker (see the type documentation).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use likely_dense::AdaptiveUnsignedSet;
    ///
    /// let set: AdaptiveUnsignedSet<u32> = [4000, 4002].into_iter().collect();
    /// assert!(set.contains(4000));
    /// assert!(!set.contains(3999));
    /// assert!(!set.contains(4001));
    /// assert!(!set.contains(1 << 30));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        debug_assert!(
            !value.is_reserved(),
            "contains: {value:?} is a reserved hash-table marker"
        );
        match &self.storage {
            Storage::Dense { bits, .. } => {
                value >= self.min && bits.get(value.offset_from(self.min))
            }
            Storage::Sparse(set) => set.contains(&value),
        }
    }

    /// Inserts `value`, returning `true` if it was not already a member.
    ///
    /// May switch the set to the other representation when that would at
    /// least halve its memory use.
    ///
    /// `value` must not be a reserved marker (see the type documentation).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use likely_dense::{AdaptiveUnsignedSet, Representation};
    ///
    /// let mut set: AdaptiveUnsignedSet<u32> = AdaptiveUnsignedSet::new();
    /// assert!(set.insert(100));
    /// assert!(set.insert(90)); // below the minimum: the bits are shifted
    /// assert!(!set.insert(100));
    /// assert_eq!(set.min(), Some(90));
    /// assert_eq!(set.representation(), Representation::Dense);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        debug_assert!(
            !value.is_reserved(),
            "insert: {value:?} is a reserved hash-table marker"
        );

        if self.is_empty() {
            self.insert_first(value);
            return true;
        }

        let (min, max) = (self.min, self.max);
        match &mut self.storage {
            Storage::Sparse(set) => {
                if !set.insert(value) {
                    return false;
                }
                self.min = min.min(value);
                self.max = max.max(value);
                if memory::should_become_dense::<T>(set.capacity(), self.min, self.max) {
                    let bits = dense_from_values(set.iter().copied(), self.min, self.max);
                    let len = set.len();
                    log::debug!(
                        "switching to dense representation: len={len} min={:?} max={:?}",
                        self.min,
                        self.max
                    );
                    self.storage = Storage::Dense { bits, len };
                }
                true
            }
            Storage::Dense { bits, len } => {
                if min <= value && value <= max {
                    let is_new = !bits.quick_set(value.offset_from(min));
                    *len += usize::from(is_new);
                    return is_new;
                }

                // Outside [min, max] the value cannot already be a member.
                *len += 1;
                let new_min = min.min(value);
                let new_max = max.max(value);

                if memory::should_become_sparse::<T>(*len, new_min, new_max) {
                    let mut set = HashSet::with_capacity_and_hasher(*len + 1, S::default());
                    set.extend(bits.iter().map(|offset| min.add_offset(offset)));
                    let inserted = set.insert(value);
                    debug_assert!(inserted, "insert: {value:?} was outside the dense bounds");
                    log::debug!(
                        "switching to sparse representation: len={} min={new_min:?} max={new_max:?}",
                        set.len()
                    );
                    self.storage = Storage::Sparse(set);
                    self.min = new_min;
                    self.max = new_max;
                    return true;
                }

                if value > max {
                    bits.set(value.offset_from(min));
                    self.max = value;
                } else {
                    let shift = min.offset_from(value);
                    log::trace!("rebuilding dense bits: minimum {min:?} -> {value:?}, shift={shift}");
                    let mut shifted = BitVector::with_len(max.offset_from(value) + 1);
                    for offset in bits.iter() {
                        shifted.quick_set(offset + shift);
                    }
                    shifted.quick_set(0);
                    *bits = shifted;
                    self.min = value;
                }
                debug_assert!(
                    *len <= bits.len(),
                    "dense length {} exceeds bit capacity {}",
                    *len,
                    bits.len()
                );
                true
            }
        }
    }

    fn insert_first(&mut self, value: T) {
        debug_assert_eq!(self.representation(), Representation::Dense);
        if let Storage::Dense { bits, len } = &mut self.storage {
            bits.set(0);
            *len = 1;
        }
        self.min = value;
        self.max = value;
    }

    /// Rescans the set and reports the first inconsistency between the live
    /// representation and the tracked length and bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the mismatch. This never
    /// happens through correct use of the public API.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use likely_dense::AdaptiveUnsignedSet;
    ///
    /// let set: AdaptiveUnsignedSet<u32> = (10_000..11_000).collect();
    /// assert_eq!(set.check(), Ok(()));
    /// ```
    pub fn check(&self) -> Result<(), ValidationError> {
        let representation = self.representation();
        let bounds = match &self.storage {
            Storage::Dense { bits, len } => {
                let actual = bits.count_ones();
                if actual != *len {
                    return Err(ValidationError::LengthMismatch {
                        representation,
                        tracked: *len,
                        actual,
                    });
                }
                // Offsets come out ascending: the first and last are the bounds.
                let mut offsets = bits.iter();
                offsets.next().map(|first| {
                    let last = offsets.last().unwrap_or(first);
                    (self.min.add_offset(first), self.min.add_offset(last))
                })
            }
            Storage::Sparse(set) => {
                if set.is_empty() {
                    return Err(ValidationError::EmptySparse);
                }
                set.iter().copied().fold(None, widen)
            }
        };

        if let Some(value) = self.iter().find(|value| value.is_reserved()) {
            return Err(ValidationError::ReservedMember {
                value: value.to_u64(),
            });
        }

        let Some((min, max)) = bounds else {
            return Ok(());
        };
        if min != self.min {
            return Err(ValidationError::MinimumMismatch {
                representation,
                tracked: self.min.to_u64(),
                actual: min.to_u64(),
            });
        }
        if max != self.max {
            return Err(ValidationError::MaximumMismatch {
                representation,
                tracked: self.max.to_u64(),
                actual: max.to_u64(),
            });
        }
        Ok(())
    }

    /// Rescans the set and panics if it is internally inconsistent.
    ///
    /// A debugging aid for representation transitions; see [`check`](Self::check)
    /// for the non-panicking form.
    ///
    /// # Panics
    ///
    /// Panics if [`check`](Self::check) reports an error.
    pub fn validate(&self) {
        if let Err(error) = self.check() {
            panic!("adaptive set is inconsistent: {error}");
        }
    }
}

/// Builds the dense bits for members spanning exactly `[min, max]`.
fn dense_from_values<T: UnsignedIndex>(values: impl Iterator<Item = T>, min: T, max: T) -> BitVector {
    let mut bits = BitVector::with_len(max.offset_from(min) + 1);
    for value in values {
        bits.quick_set(value.offset_from(min));
    }
    debug_assert!(bits.get(0), "dense rebuild lost the minimum {min:?}");
    bits
}

#[inline]
fn widen<T: UnsignedIndex>(bounds: Option<(T, T)>, value: T) -> Option<(T, T)> {
    Some(bounds.map_or((value, value), |(min, max)| {
        (min.min(value), max.max(value))
    }))
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: UnsignedIndex, S> Default for AdaptiveUnsignedSet<T, S> {
    #[inline]
    fn default() -> Self {
        Self::with_hasher_type()
    }
}

impl<T: UnsignedIndex, S> std::fmt::Debug for AdaptiveUnsignedSet<T, S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: UnsignedIndex, S: BuildHasher + Default> PartialEq for AdaptiveUnsignedSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }
}

impl<T: UnsignedIndex, S: BuildHasher + Default> Eq for AdaptiveUnsignedSet<T, S> {}

impl<T: UnsignedIndex, S: BuildHasher + Default> FromIterator<T> for AdaptiveUnsignedSet<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T: UnsignedIndex, S: BuildHasher + Default> Extend<T> for AdaptiveUnsignedSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: UnsignedIndex, S: BuildHasher + Default> Extend<&'a T> for AdaptiveUnsignedSet<T, S> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T: UnsignedIndex, S> IntoIterator for &'a AdaptiveUnsignedSet<T, S> {
    type Item = T;
    type IntoIter = Iter<'a, T, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, S> serde::Serialize for AdaptiveUnsignedSet<T, S>
where
    T: UnsignedIndex + serde::Serialize,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct AdaptiveUnsignedSetVisitor<T, S> {
    marker: std::marker::PhantomData<(T, S)>,
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::de::Visitor<'de> for AdaptiveUnsignedSetVisitor<T, S>
where
    T: UnsignedIndex + serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = AdaptiveUnsignedSet<T, S>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of unsigned integers")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = AdaptiveUnsignedSet::default();
        while let Some(value) = seq.next_element::<T>()? {
            if value.is_reserved() {
                return Err(serde::de::Error::custom(format_args!(
                    "{value:?} is a reserved value and cannot be a member"
                )));
            }
            set.insert(value);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, S> serde::Deserialize<'de> for AdaptiveUnsignedSet<T, S>
where
    T: UnsignedIndex + serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(AdaptiveUnsignedSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
