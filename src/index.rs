//! Unsigned key types accepted by [`AdaptiveUnsignedSet`].
//!
//! [`UnsignedIndex`] abstracts over the primitive unsigned integers so the set
//! can compute bit offsets (`value - min`) and translate them back. Each key
//! type also reserves its two largest values: the hash-table convention used
//! by the sparse representation treats `MAX` as the "empty" marker and
//! `MAX - 1` as the "deleted" marker, so neither may be stored.
//!
//! # Examples
//!
//! ```rust
//! use likely_dense::index::UnsignedIndex;
//!
//! assert_eq!(4003u32.offset_from(4000), 3);
//! assert_eq!(4000u32.add_offset(3), 4003);
//! assert!(u32::MAX.is_reserved());
//! assert!((u32::MAX - 1).is_reserved());
//! assert!(!(u32::MAX - 2).is_reserved());
//! ```
//!
//! [`AdaptiveUnsignedSet`]: crate::AdaptiveUnsignedSet

use std::fmt::Debug;
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// An unsigned primitive integer usable as a member of an
/// [`AdaptiveUnsignedSet`](crate::AdaptiveUnsignedSet).
///
/// This trait is sealed; it is implemented for `u8`, `u16`, `u32`, `u64`
/// and `usize`.
pub trait UnsignedIndex: Copy + Ord + Hash + Debug + Send + Sync + 'static + sealed::Sealed {
    /// The smallest value of the type.
    const ZERO: Self;

    /// The largest value of the type.
    const MAX: Self;

    /// The hash-table "empty slot" marker. Never a valid member.
    const EMPTY_VALUE: Self;

    /// The hash-table "deleted slot" marker. Never a valid member.
    const DELETED_VALUE: Self;

    /// Widens the value to `u64` for cost-model arithmetic.
    fn to_u64(self) -> u64;

    /// Returns `self - base` as a bit offset.
    ///
    /// Requires `self >= base`. Distances that do not fit in `usize` saturate
    /// to `usize::MAX`, which no bit vector can address.
    fn offset_from(self, base: Self) -> usize;

    /// Returns `self + offset`.
    ///
    /// Requires the result to be representable; offsets always come from a
    /// bit vector spanning `[min, max]`, so they are.
    fn add_offset(self, offset: usize) -> Self;

    /// Returns `true` if the value is one of the two reserved markers.
    #[inline]
    fn is_reserved(self) -> bool {
        self == Self::EMPTY_VALUE || self == Self::DELETED_VALUE
    }
}

macro_rules! impl_unsigned_index {
    ($($primitive:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $primitive {}

            impl UnsignedIndex for $primitive {
                const ZERO: Self = 0;
                const MAX: Self = <$primitive>::MAX;
                const EMPTY_VALUE: Self = <$primitive>::MAX;
                const DELETED_VALUE: Self = <$primitive>::MAX - 1;

                #[inline]
                #[allow(clippy::cast_lossless, clippy::unnecessary_cast)]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                #[allow(clippy::useless_conversion)]
                fn offset_from(self, base: Self) -> usize {
                    debug_assert!(self >= base, "offset_from: {self} is below base {base}");
                    usize::try_from(self - base).unwrap_or(usize::MAX)
                }

                #[inline]
                #[allow(
                    clippy::cast_lossless,
                    clippy::cast_possible_truncation,
                    clippy::unnecessary_cast
                )]
                fn add_offset(self, offset: usize) -> Self {
                    debug_assert!(
                        (offset as u64) <= (<$primitive>::MAX - self) as u64,
                        "add_offset: {self} + {offset} overflows"
                    );
                    self + offset as Self
                }
            }
        )*
    };
}

impl_unsigned_index!(u8, u16, u32, u64, usize);
