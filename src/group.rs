//! Popcount-keyed grouping of terms.

use crate::complement::Complements;
use crate::term::Term;

/// Arena of ordered buckets indexed by popcount `0..=width`.
///
/// A key is *present* iff its bucket is non-empty.
/// Items keep their insertion order within a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopcountGroups<T> {
    buckets: Vec<Vec<T>>,
}

impl<T> PopcountGroups<T> {
    pub fn new(width: usize) -> Self {
        Self {
            buckets: (0..=width).map(|_| Vec::new()).collect(),
        }
    }

    /// Largest possible key.
    pub fn width(&self) -> usize {
        self.buckets.len() - 1
    }

    pub fn push(&mut self, key: usize, item: T) {
        assert!(
            key < self.buckets.len(),
            "Popcount {} is out of range 0..={}",
            key,
            self.width()
        );
        self.buckets[key].push(item);
    }

    /// Items of the group `key`. Absent and out-of-range keys give an empty slice.
    pub fn get(&self, key: usize) -> &[T] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_present(&self, key: usize) -> bool {
        !self.get(key).is_empty()
    }

    /// Present keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Present groups in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[T])> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(key, bucket)| (key, bucket.as_slice()))
    }

    /// All items, group by group in ascending key order.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flatten()
    }

    /// Number of present keys.
    pub fn len_keys(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    /// Total number of items over all groups.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl<T: PartialEq> PopcountGroups<T> {
    pub fn contains(&self, key: usize, item: &T) -> bool {
        self.get(key).contains(item)
    }
}

/// Partitions the complements by the number of ones in their binary encoding.
///
/// Returns the binary groups and the decimal groups, index-aligned per key.
pub fn group_by_popcount(
    complements: &Complements,
) -> (PopcountGroups<Term>, PopcountGroups<u32>) {
    let mut binary_groups = PopcountGroups::new(complements.width);
    let mut minterm_groups = PopcountGroups::new(complements.width);

    for (&row, binary) in complements.complements.iter().zip(&complements.binary_numbers) {
        let ones = binary.ones();
        binary_groups.push(ones, binary.clone());
        minterm_groups.push(ones, row);
    }

    (binary_groups, minterm_groups)
}
