//! Iterators over the contents of a [`Multiset`](crate::Multiset)

use hashbrown::hash_table;
use std::{fmt, iter::FusedIterator, num::NonZeroUsize};

/// An iterator over the elements of a [`Multiset`](crate::Multiset), where
/// each value is yielded as many times as it occurs.
///
/// Equivalent elements are yielded consecutively, but the order in which
/// distinct values are visited is unspecified. It is only guaranteed to be
/// the same across two passes over a multiset that was not modified in
/// between.
///
/// This `struct` is created by the [`iter()`](crate::Multiset::iter) method on
/// [`Multiset`](crate::Multiset). See its documentation for more.
pub struct Iter<'a, T> {
    /// Remaining distinct entries
    entries: hash_table::Iter<'a, (T, usize)>,

    /// Value being repeated, along with the number of repetitions left
    current: Option<(&'a T, usize)>,

    /// Number of elements left to yield, across all entries
    remaining: usize,
}
//
impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(entries: hash_table::Iter<'a, (T, usize)>, len: usize) -> Self {
        Self {
            entries,
            current: None,
            remaining: len,
        }
    }
}
//
impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
//
impl<T> ExactSizeIterator for Iter<'_, T> {
    #[must_use = "Only effect is to produce a result"]
    fn len(&self) -> usize {
        self.remaining
    }
}
//
impl<T> FusedIterator for Iter<'_, T> {}
//
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((value, repetitions)) = &mut self.current {
                if *repetitions > 0 {
                    *repetitions -= 1;
                    self.remaining -= 1;
                    return Some(*value);
                }
            }
            let (value, multiplicity) = self.entries.next()?;
            self.current = Some((value, *multiplicity));
        }
    }

    #[must_use = "Only effect is to produce a result"]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.remaining
    }
}

/// An iterator over the distinct values of a [`Multiset`](crate::Multiset),
/// along with their multiplicities.
///
/// This `struct` is created by the [`entries()`](crate::Multiset::entries)
/// method on [`Multiset`](crate::Multiset). See its documentation for more.
pub struct Entries<'a, T>(pub(crate) hash_table::Iter<'a, (T, usize)>);
//
impl<T> fmt::Debug for Entries<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entries")
            .field("remaining", &self.0.len())
            .finish_non_exhaustive()
    }
}
//
impl<T> ExactSizeIterator for Entries<'_, T> {
    #[must_use = "Only effect is to produce a result"]
    fn len(&self) -> usize {
        self.0.len()
    }
}
//
impl<T> FusedIterator for Entries<'_, T> {}
//
impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (&'a T, NonZeroUsize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(value, multiplicity)| (value, crate::nonzero(*multiplicity)))
    }

    #[must_use = "Only effect is to produce a result"]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }

    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.0.len()
    }
}
