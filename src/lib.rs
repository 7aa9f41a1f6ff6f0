//! # likely-dense
//!
//! A memory-adaptive set of unsigned integers for keys that are usually
//! clustered densely (object identifiers, array indices) but occasionally
//! sparse or wide-ranging.
//!
//! ## Overview
//!
//! [`AdaptiveUnsignedSet`] stores its members either as a bit vector offset by
//! the smallest member, or as a hash set of raw values, and switches between
//! the two whenever that at least halves its memory use. It supports:
//!
//! - **Membership**: [`contains`](AdaptiveUnsignedSet::contains)
//! - **Insertion**: [`insert`](AdaptiveUnsignedSet::insert) (there is no removal)
//! - **Iteration**: [`iter`](AdaptiveUnsignedSet::iter), ascending in the dense
//!   representation
//! - **Memory accounting**: [`memory_use`](AdaptiveUnsignedSet::memory_use)
//! - **Self-check**: [`check`](AdaptiveUnsignedSet::check) and
//!   [`validate`](AdaptiveUnsignedSet::validate)
//!
//! ## Feature Flags
//!
//! - `fxhash` (default): the sparse representation hashes with `rustc-hash`
//! - `ahash`: the sparse representation hashes with `ahash` (takes precedence)
//! - `serde`: `Serialize`/`Deserialize` as a sequence of members
//! - `full`: `fxhash` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use likely_dense::prelude::*;
//!
//! let mut set: AdaptiveUnsignedSet<u32> = AdaptiveUnsignedSet::new();
//! set.extend([0, 1, 2]);
//! assert_eq!(set.representation(), Representation::Dense);
//!
//! // A single far-away key makes the bit vector too large.
//! set.insert(1_000_000);
//! assert_eq!(set.representation(), Representation::Sparse);
//! assert!(set.contains(1_000_000));
//! assert!(!set.contains(3));
//! assert_eq!(set.len(), 4);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use likely_dense::prelude::*;
/// ```
pub mod prelude {
    pub use crate::index::UnsignedIndex;
    pub use crate::{AdaptiveUnsignedSet, Representation, ValidationError};
}

pub mod bit_vector;
pub mod error;
pub mod index;
pub mod iter;
pub mod memory;
mod set;

pub use error::ValidationError;
pub use iter::Iter;
pub use set::{AdaptiveUnsignedSet, DefaultHashBuilder, Representation};

// The set owns its storage exclusively and is moved, never copied.
static_assertions::assert_not_impl_any!(AdaptiveUnsignedSet<u32>: Clone, Copy);
static_assertions::assert_impl_all!(AdaptiveUnsignedSet<u64>: Send, Sync, Default);
static_assertions::assert_impl_all!(Iter<'static, u32, DefaultHashBuilder>: ExactSizeIterator, Clone);
