//! Iterator over an [`AdaptiveUnsignedSet`](crate::AdaptiveUnsignedSet).

use std::collections::HashSet;
use std::collections::hash_set;
use std::iter::FusedIterator;

use crate::bit_vector::Ones;
use crate::index::UnsignedIndex;

/// Iterator over the members of an
/// [`AdaptiveUnsignedSet`](crate::AdaptiveUnsignedSet).
///
/// Wraps either a bit vector cursor, whose offsets are shifted by the set's
/// minimum, or a hash set cursor, whose values are yielded unchanged. The
/// shift is carried explicitly: two iterators are equal only if they walk the
/// same storage, stand at the same position, and carry the same shift.
///
/// # Examples
///
/// ```rust
/// use likely_dense::AdaptiveUnsignedSet;
///
/// let set: AdaptiveUnsignedSet<u32> = [4000, 4002, 4003].into_iter().collect();
///
/// let mut iter = set.iter();
/// assert_eq!(iter.len(), 3);
/// assert_eq!(iter.next(), Some(4000));
/// assert_ne!(iter, set.iter());
///
/// let mut restarted = set.iter();
/// restarted.next();
/// assert_eq!(iter, restarted);
/// ```
pub struct Iter<'a, T, S> {
    cursor: Cursor<'a, T, S>,
    shift: T,
    remaining: usize,
}

enum Cursor<'a, T, S> {
    Dense(Ones<'a>),
    Sparse {
        set: &'a HashSet<T, S>,
        values: hash_set::Iter<'a, T>,
    },
}

impl<'a, T: UnsignedIndex, S> Iter<'a, T, S> {
    #[inline]
    pub(crate) const fn dense(ones: Ones<'a>, shift: T, len: usize) -> Self {
        Self {
            cursor: Cursor::Dense(ones),
            shift,
            remaining: len,
        }
    }

    #[inline]
    pub(crate) fn sparse(set: &'a HashSet<T, S>, shift: T) -> Self {
        Self {
            cursor: Cursor::Sparse {
                set,
                values: set.iter(),
            },
            shift,
            remaining: set.len(),
        }
    }
}

impl<T: UnsignedIndex, S> Iterator for Iter<'_, T, S> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let shift = self.shift;
        let value = match &mut self.cursor {
            Cursor::Dense(ones) => ones.next().map(|offset| shift.add_offset(offset)),
            Cursor::Sparse { values, .. } => values.next().copied(),
        }?;
        self.remaining -= 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: UnsignedIndex, S> ExactSizeIterator for Iter<'_, T, S> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T: UnsignedIndex, S> FusedIterator for Iter<'_, T, S> {}

impl<T: UnsignedIndex, S> Clone for Iter<'_, T, S> {
    fn clone(&self) -> Self {
        let cursor = match &self.cursor {
            Cursor::Dense(ones) => Cursor::Dense(ones.clone()),
            Cursor::Sparse { set, values } => Cursor::Sparse {
                set: *set,
                values: values.clone(),
            },
        };
        Self {
            cursor,
            shift: self.shift,
            remaining: self.remaining,
        }
    }
}

impl<T: UnsignedIndex, S> PartialEq for Iter<'_, T, S> {
    fn eq(&self, other: &Self) -> bool {
        let same_cursor = match (&self.cursor, &other.cursor) {
            (Cursor::Dense(left), Cursor::Dense(right)) => left == right,
            (
                Cursor::Sparse {
                    set: left_set,
                    values: left_values,
                },
                Cursor::Sparse {
                    set: right_set,
                    values: right_values,
                },
            ) => std::ptr::eq(*left_set, *right_set) && left_values.len() == right_values.len(),
            _ => false,
        };
        same_cursor && self.shift == other.shift
    }
}

impl<T: UnsignedIndex, S> Eq for Iter<'_, T, S> {}

impl<T: UnsignedIndex, S> std::fmt::Debug for Iter<'_, T, S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let representation = match self.cursor {
            Cursor::Dense(_) => "dense",
            Cursor::Sparse { .. } => "sparse",
        };
        formatter
            .debug_struct("Iter")
            .field("representation", &representation)
            .field("shift", &self.shift)
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{AdaptiveUnsignedSet, Representation};
    use rstest::rstest;

    fn sparse_set() -> AdaptiveUnsignedSet<u32> {
        let set: AdaptiveUnsignedSet<u32> = [0, 1, 2, 1_000_000].into_iter().collect();
        assert_eq!(set.representation(), Representation::Sparse);
        set
    }

    #[rstest]
    fn test_dense_iteration_is_ascending_and_shifted() {
        let set: AdaptiveUnsignedSet<u64> = [1 << 40, (1 << 40) + 7, (1 << 40) + 3]
            .into_iter()
            .collect();
        let members: Vec<u64> = set.iter().collect();
        assert_eq!(members, vec![1 << 40, (1 << 40) + 3, (1 << 40) + 7]);
    }

    #[rstest]
    fn test_sparse_iteration_yields_raw_values() {
        let set = sparse_set();
        let mut members: Vec<u32> = set.iter().collect();
        members.sort_unstable();
        assert_eq!(members, vec![0, 1, 2, 1_000_000]);
    }

    #[rstest]
    fn test_len_counts_down() {
        let set = sparse_set();
        let mut iter = set.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
        iter.by_ref().for_each(drop);
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }

    #[rstest]
    fn test_empty_set_iterator_is_empty() {
        let set: AdaptiveUnsignedSet<u16> = AdaptiveUnsignedSet::new();
        assert_eq!(set.iter().next(), None);
        assert_eq!(set.iter().len(), 0);
    }

    #[rstest]
    fn test_sparse_cursor_equality() {
        let set = sparse_set();
        let mut first = set.iter();
        let second = set.iter();
        assert_eq!(first, second);
        first.next();
        assert_ne!(first, second);
    }

    #[rstest]
    fn test_iterators_over_distinct_sets_differ() {
        let left = sparse_set();
        let right = sparse_set();
        assert_ne!(left.iter(), right.iter());
    }

    #[rstest]
    fn test_exhausted_dense_iterators_from_same_set_are_equal() {
        let set: AdaptiveUnsignedSet<u32> = (100..300).collect();
        let mut first = set.iter();
        let mut second = set.iter();
        first.by_ref().for_each(drop);
        second.by_ref().for_each(drop);
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_clone_resumes_from_same_position() {
        let set: AdaptiveUnsignedSet<u32> = (10..20).collect();
        let mut iter = set.iter();
        iter.next();
        let cloned = iter.clone();
        assert_eq!(iter, cloned);
        assert_eq!(iter.collect::<Vec<_>>(), cloned.collect::<Vec<_>>());
    }

    #[rstest]
    fn test_debug_names_representation() {
        let set = sparse_set();
        let debug = format!("{:?}", set.iter());
        assert!(debug.contains("sparse"));
        assert!(debug.contains("remaining: 4"));
    }
}
