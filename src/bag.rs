use crate::error::{Error, Result};

use im::OrdMap;
use std::iter::repeat;

/// A persistent sorted multiset.
///
/// Cloning is cheap (structural sharing), and every "mutating" operation
/// returns a new bag instead of changing the receiver. Iteration yields the
/// elements expanded by multiplicity, in their total order, which keeps the
/// representation deterministic regardless of insertion order.
///
/// # Examples:
/// ```
/// use railgame::bag::Bag;
///
/// let bag: Bag<u8> = [3, 1, 3].into_iter().collect();
/// assert_eq!(bag.len(), 3);
/// assert_eq!(bag.count_of(&3), 2);
/// assert_eq!(bag.iter().copied().collect::<Vec<_>>(), vec![1, 3, 3]);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bag<T: Ord + Clone> {
    counts: OrdMap<T, usize>,
    len: usize,
}

impl<T: Ord + Clone> Bag<T> {
    /// Returns an empty bag.
    pub fn new() -> Self {
        Self {
            counts: OrdMap::new(),
            len: 0,
        }
    }

    /// Returns a bag holding `count` copies of `item`.
    pub fn of(count: usize, item: T) -> Self {
        Self::new().with_added(count, item)
    }

    /// Total number of elements, counting multiplicities.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// How many copies of `item` this bag holds.
    pub fn count_of(&self, item: &T) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }

    /// Whether this bag holds at least every element of `other`,
    /// with at least the same multiplicities.
    pub fn contains(&self, other: &Self) -> bool {
        other
            .counts
            .iter()
            .all(|(item, &count)| self.count_of(item) >= count)
    }

    /// Returns a new bag with `count` extra copies of `item`.
    pub fn with_added(&self, count: usize, item: T) -> Self {
        if count == 0 {
            return self.clone();
        }

        let mut counts = self.counts.clone();
        *counts.entry(item).or_insert(0) += count;

        Self {
            counts,
            len: self.len + count,
        }
    }

    /// Returns the multiset union of the two bags.
    pub fn union(&self, other: &Self) -> Self {
        let mut counts = self.counts.clone();
        for (item, &count) in other.counts.iter() {
            *counts.entry(item.clone()).or_insert(0) += count;
        }

        Self {
            counts,
            len: self.len + other.len,
        }
    }

    /// Returns a new bag with every element of `other` removed.
    ///
    /// Fails with [`Error::InsufficientCards`] if `other` is not contained in
    /// this bag; in that case nothing is removed.
    pub fn difference(&self, other: &Self) -> Result<Self> {
        let mut counts = self.counts.clone();
        for (item, &count) in other.counts.iter() {
            let available = self.count_of(item);
            if available < count {
                return Err(Error::InsufficientCards);
            }

            if available == count {
                counts.remove(item);
            } else {
                counts.insert(item.clone(), available - count);
            }
        }

        Ok(Self {
            counts,
            len: self.len - other.len,
        })
    }

    /// Iterates over the elements in sorted order, expanded by multiplicity.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.counts
            .iter()
            .flat_map(|(item, &count)| repeat(item).take(count))
    }

    /// Iterates over the distinct elements with their multiplicities.
    pub fn counts(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.counts.iter().map(|(item, &count)| (item, count))
    }
}

impl<T: Ord + Clone> Default for Bag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> FromIterator<T> for Bag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counts = OrdMap::new();
        let mut len = 0;
        for item in iter {
            *counts.entry(item).or_insert(0) += 1;
            len += 1;
        }

        Self { counts, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bag() {
        let bag: Bag<u8> = Bag::new();
        assert!(bag.is_empty());
        assert_eq!(bag.len(), 0);
        assert_eq!(bag.count_of(&1), 0);
    }

    #[test]
    fn of_zero_copies_is_empty() {
        let bag = Bag::of(0, 'a');
        assert!(bag.is_empty());
        assert_eq!(bag, Bag::new());
    }

    #[test]
    fn iteration_is_sorted_and_expanded() {
        let bag: Bag<char> = ['c', 'a', 'c', 'b'].into_iter().collect();
        assert_eq!(
            bag.iter().copied().collect::<Vec<_>>(),
            vec!['a', 'b', 'c', 'c']
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let first: Bag<u8> = [1, 2, 2, 3].into_iter().collect();
        let second: Bag<u8> = [2, 3, 1, 2].into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn union_adds_multiplicities() {
        let first = Bag::of(2, 'x');
        let second = Bag::of(1, 'x').with_added(3, 'y');
        let union = first.union(&second);

        assert_eq!(union.len(), 6);
        assert_eq!(union.count_of(&'x'), 3);
        assert_eq!(union.count_of(&'y'), 3);
    }

    #[test]
    fn difference_removes_exact_copies() {
        let bag = Bag::of(3, 'x').with_added(1, 'y');
        let removed = bag.difference(&Bag::of(2, 'x')).unwrap();

        assert_eq!(removed.len(), 2);
        assert_eq!(removed.count_of(&'x'), 1);
        assert_eq!(removed.count_of(&'y'), 1);

        // Removing the last copies drops the key entirely.
        let drained = removed.difference(&removed).unwrap();
        assert!(drained.is_empty());
        assert_eq!(drained, Bag::new());
    }

    #[test]
    fn difference_fails_when_not_contained() {
        let bag = Bag::of(1, 'x');
        assert_eq!(
            bag.difference(&Bag::of(2, 'x')),
            Err(Error::InsufficientCards)
        );
        assert_eq!(
            bag.difference(&Bag::of(1, 'z')),
            Err(Error::InsufficientCards)
        );

        // The failed removal did not change the receiver.
        assert_eq!(bag.count_of(&'x'), 1);
    }

    #[test]
    fn contains_is_multiplicity_aware() {
        let bag = Bag::of(2, 'x').with_added(1, 'y');

        assert!(bag.contains(&Bag::new()));
        assert!(bag.contains(&Bag::of(2, 'x')));
        assert!(bag.contains(&Bag::of(1, 'x').with_added(1, 'y')));
        assert!(!bag.contains(&Bag::of(3, 'x')));
        assert!(!bag.contains(&Bag::of(1, 'z')));
    }

    #[test]
    fn persistence_across_updates() {
        let original = Bag::of(1, 'x');
        let updated = original.with_added(1, 'x');

        assert_eq!(original.count_of(&'x'), 1);
        assert_eq!(updated.count_of(&'x'), 2);
    }
}
