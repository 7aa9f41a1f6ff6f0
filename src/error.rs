//! Error types reported by the set's self-check.
//!
//! [`AdaptiveUnsignedSet::check`](crate::AdaptiveUnsignedSet::check) rescans
//! the live representation and compares it against the tracked length and
//! bounds. Any disagreement means a representation transition went wrong; it
//! is never caused by correct use of the public API.

use crate::Representation;

/// An internal inconsistency found by a full scan of the set.
///
/// Bounds are widened to `u64` so the error type does not depend on the
/// key type.
///
/// # Examples
///
/// ```rust
/// use likely_dense::{Representation, ValidationError};
///
/// let error = ValidationError::LengthMismatch {
///     representation: Representation::Dense,
///     tracked: 3,
///     actual: 2,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "dense representation tracks 3 members but holds 2"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The tracked member count differs from the number of stored members.
    LengthMismatch {
        /// The representation that was scanned.
        representation: Representation,
        /// The count the set reports from `len()`.
        tracked: usize,
        /// The count found by scanning.
        actual: usize,
    },
    /// The tracked minimum differs from the smallest stored member.
    MinimumMismatch {
        /// The representation that was scanned.
        representation: Representation,
        /// The minimum the set tracks.
        tracked: u64,
        /// The minimum found by scanning.
        actual: u64,
    },
    /// The tracked maximum differs from the largest stored member.
    MaximumMismatch {
        /// The representation that was scanned.
        representation: Representation,
        /// The maximum the set tracks.
        tracked: u64,
        /// The maximum found by scanning.
        actual: u64,
    },
    /// The sparse representation holds no members.
    EmptySparse,
    /// A reserved hash-table marker is stored as a member.
    ReservedMember {
        /// The offending value.
        value: u64,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch {
                representation,
                tracked,
                actual,
            } => write!(
                formatter,
                "{representation} representation tracks {tracked} members but holds {actual}"
            ),
            Self::MinimumMismatch {
                representation,
                tracked,
                actual,
            } => write!(
                formatter,
                "{representation} representation tracks minimum {tracked} but its smallest member is {actual}"
            ),
            Self::MaximumMismatch {
                representation,
                tracked,
                actual,
            } => write!(
                formatter,
                "{representation} representation tracks maximum {tracked} but its largest member is {actual}"
            ),
            Self::EmptySparse => write!(formatter, "sparse representation is empty"),
            Self::ReservedMember { value } => {
                write!(formatter, "reserved value {value} is stored as a member")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
