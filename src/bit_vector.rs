//! Growable bit vector backing the dense representation.
//!
//! Bits are packed into `u64` words held in a `SmallVec<[u64; 1]>`, so a
//! vector of up to 64 bits lives inline and costs no heap allocation. Larger
//! vectors spill to the heap; [`BitVector::out_of_line_memory_use`] reports
//! exactly that spilled allocation.
//!
//! Reads past the end of the vector return `false` rather than panicking, which
//! lets callers test membership of arbitrarily large offsets.
//!
//! # Examples
//!
//! ```rust
//! use likely_dense::bit_vector::BitVector;
//!
//! let mut bits = BitVector::new();
//! assert!(!bits.set(0));
//! assert!(!bits.set(2));
//! assert!(!bits.set(3));
//! assert!(bits.set(3)); // already set
//!
//! assert!(bits.get(2));
//! assert!(!bits.get(1));
//! assert!(!bits.get(1_000_000));
//!
//! let offsets: Vec<usize> = bits.iter().collect();
//! assert_eq!(offsets, vec![0, 2, 3]);
//! ```

use smallvec::SmallVec;
use std::iter::FusedIterator;

type Word = u64;

const WORD_BITS: usize = Word::BITS as usize;

/// Number of words kept inline before spilling to the heap.
const INLINE_WORDS: usize = 1;

#[inline]
const fn words_for(bit_count: usize) -> usize {
    bit_count.div_ceil(WORD_BITS)
}

#[inline]
const fn word_index_and_mask(index: usize) -> (usize, Word) {
    (index / WORD_BITS, 1 << (index % WORD_BITS))
}

/// A growable array of bits.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitVector {
    words: SmallVec<[Word; INLINE_WORDS]>,
}

impl BitVector {
    /// Creates an empty bit vector without allocating.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: SmallVec::new(),
        }
    }

    /// Creates a zeroed bit vector able to hold at least `bit_count` bits.
    ///
    /// The allocation is sized exactly to the number of words required.
    #[must_use]
    pub fn with_len(bit_count: usize) -> Self {
        let word_count = words_for(bit_count);
        let mut words = SmallVec::with_capacity(word_count);
        words.resize(word_count, 0);
        Self { words }
    }

    /// Returns the number of addressable bits (always a multiple of 64).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Returns `true` if no bits are addressable.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the bit at `index`; indexes past the end read as `false`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        let (word_index, mask) = word_index_and_mask(index);
        self.words
            .get(word_index)
            .is_some_and(|word| word & mask != 0)
    }

    /// Grows the vector so that `bit_count` bits are addressable.
    ///
    /// The allocation grows to exactly the words required.
    pub fn ensure_len(&mut self, bit_count: usize) {
        let word_count = words_for(bit_count);
        if word_count > self.words.len() {
            self.words.reserve_exact(word_count - self.words.len());
            self.words.resize(word_count, 0);
        }
    }

    /// Sets the bit at `index`, growing the vector if needed.
    ///
    /// Returns the previous value of the bit.
    #[inline]
    pub fn set(&mut self, index: usize) -> bool {
        self.ensure_len(index + 1);
        self.quick_set(index)
    }

    /// Sets the bit at `index`, which must already be addressable.
    ///
    /// Returns the previous value of the bit.
    #[inline]
    pub fn quick_set(&mut self, index: usize) -> bool {
        debug_assert!(index < self.len(), "quick_set: index {index} out of bounds");
        let (word_index, mask) = word_index_and_mask(index);
        let word = &mut self.words[word_index];
        let previous = *word & mask != 0;
        *word |= mask;
        previous
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Returns the number of heap bytes held by the vector.
    ///
    /// Zero while the words fit inline.
    #[inline]
    #[must_use]
    pub fn out_of_line_memory_use(&self) -> usize {
        if self.words.spilled() {
            self.words.capacity() * std::mem::size_of::<Word>()
        } else {
            0
        }
    }

    /// Returns an iterator over the offsets of set bits in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Ones<'_> {
        Ones::new(&self.words)
    }
}

impl std::fmt::Debug for BitVector {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = usize;
    type IntoIter = Ones<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the offsets of set bits in a [`BitVector`].
///
/// Two cursors compare equal only if they walk the same storage and stand at
/// the same position.
#[derive(Clone)]
pub struct Ones<'a> {
    words: &'a [Word],
    word_index: usize,
    /// Unvisited bits of `words[word_index]`.
    current: Word,
}

impl<'a> Ones<'a> {
    #[inline]
    fn new(words: &'a [Word]) -> Self {
        Self {
            words,
            word_index: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word_index * WORD_BITS + bit);
            }
            if self.word_index + 1 >= self.words.len() {
                self.word_index = self.words.len();
                return None;
            }
            self.word_index += 1;
            self.current = self.words[self.word_index];
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining_words = self.words.len().saturating_sub(self.word_index + 1);
        let upper = self.current.count_ones() as usize + remaining_words * WORD_BITS;
        (usize::from(self.current != 0), Some(upper))
    }
}

impl FusedIterator for Ones<'_> {}

impl PartialEq for Ones<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.words, other.words)
            && self.word_index == other.word_index
            && self.current == other.current
    }
}

impl Eq for Ones<'_> {}

impl std::fmt::Debug for Ones<'_> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Ones")
            .field("word_index", &self.word_index)
            .field("current", &format_args!("{:#x}", self.current))
            .finish_non_exhaustive()
    }
}
