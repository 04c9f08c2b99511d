//! Dense bit set of truth-table rows.
//!
//! Coverage sets, the input-membership test and the set of rows still to be
//! covered during chart reduction are all small subsets of `0..2^n`, so a
//! word-packed bit set beats hashing for every operation the engine needs.

use std::fmt;

/// A set of rows backed by a vector of u64 words.
///
/// Each bit corresponds to a row index. The set grows automatically
/// when inserting rows beyond the current capacity.
#[derive(Clone)]
pub struct RowSet {
    /// Storage: each u64 holds 64 rows
    words: Vec<u64>,
    /// Number of set bits (cached for O(1) len())
    count: usize,
}

impl RowSet {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty set able to hold rows `0..capacity` without growing.
    pub fn new(capacity: usize) -> Self {
        let num_words = capacity.div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
            count: 0,
        }
    }

    /// Creates an empty set with no pre-allocated capacity.
    pub fn empty() -> Self {
        Self {
            words: Vec::new(),
            count: 0,
        }
    }

    /// Returns the number of rows in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn word_and_bit(row: u32) -> (usize, usize) {
        let index = row as usize;
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    #[inline]
    pub fn contains(&self, row: u32) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(row);
        match self.words.get(word_idx) {
            Some(word) => (word >> bit_idx) & 1 == 1,
            None => false,
        }
    }

    /// Adds a row. Returns true if the row was not previously present.
    #[inline]
    pub fn insert(&mut self, row: u32) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(row);

        // Grow if necessary
        if word_idx >= self.words.len() {
            self.words.resize(word_idx + 1, 0);
        }

        let mask = 1u64 << bit_idx;
        let was_clear = (self.words[word_idx] & mask) == 0;
        if was_clear {
            self.words[word_idx] |= mask;
            self.count += 1;
        }
        was_clear
    }

    /// Removes a row. Returns true if the row was present.
    #[inline]
    pub fn remove(&mut self, row: u32) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(row);
        if word_idx >= self.words.len() {
            return false;
        }

        let mask = 1u64 << bit_idx;
        let was_set = (self.words[word_idx] & mask) != 0;
        if was_set {
            self.words[word_idx] &= !mask;
            self.count -= 1;
        }
        was_set
    }

    /// Adds every row of `other` to `self`.
    pub fn union_with(&mut self, other: &RowSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= b;
        }
        self.recount();
    }

    /// Removes every row of `other` from `self`.
    pub fn difference_with(&mut self, other: &RowSet) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a &= !b;
        }
        self.recount();
    }

    /// Number of rows present in both sets.
    pub fn intersection_len(&self, other: &RowSet) -> usize {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    fn recount(&mut self) {
        self.count = self.words.iter().map(|w| w.count_ones() as usize).sum();
    }

    /// Returns an iterator over all rows in ascending order.
    pub fn iter(&self) -> RowSetIter<'_> {
        RowSetIter {
            set: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }
}

impl Default for RowSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for RowSet {
    fn eq(&self, other: &Self) -> bool {
        // Trailing zero words carry no rows.
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl Eq for RowSet {}

impl fmt::Debug for RowSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u32> for RowSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = RowSet::empty();
        set.extend(iter);
        set
    }
}

impl Extend<u32> for RowSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for row in iter {
            self.insert(row);
        }
    }
}

/// Iterator over the rows of a [`RowSet`].
pub struct RowSetIter<'a> {
    set: &'a RowSet,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for RowSetIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some((self.word_idx * RowSet::BITS_PER_WORD + bit_idx) as u32);
            }

            self.word_idx += 1;
            if self.word_idx >= self.set.words.len() {
                return None;
            }
            self.current_word = self.set.words[self.word_idx];
        }
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = u32;
    type IntoIter = RowSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
