//! Multiset algebra: in-place and value-returning set operations, along with
//! inclusion and equality predicates.
//!
//! Operations that accept a sequence of element references as their "other"
//! operand first tally it with the equivalence relation of the receiver. The
//! operand can therefore be another [`Multiset`], whatever its own relation,
//! or any slice or collection of elements.

use crate::{Equivalence, Multiset};
use hashbrown::{HashTable, hash_table::Entry};
use log::trace;
use std::{
    num::NonZeroUsize,
    ops::{Add, BitOr, BitXor, Mul, Sub},
};

/// Multiplicities of a borrowed sequence of elements, as seen through the
/// equivalence relation of another multiset
struct Tally<'a, T> {
    /// Representative element of each distinct value and its multiplicity
    table: HashTable<(&'a T, usize)>,

    /// Number of elements = sum of all multiplicities
    len: usize,
}
//
impl<'a, T> Tally<'a, T> {
    /// Count the occurences of each value within `elements`
    fn new<E: Equivalence<T>>(elements: impl IntoIterator<Item = &'a T>, equivalence: &E) -> Self {
        let mut result = Self {
            table: HashTable::new(),
            len: 0,
        };
        for element in elements {
            result.add(element, 1, equivalence);
        }
        result
    }

    /// Tally the entries of a multiset
    fn from_entries<E: Equivalence<T>>(
        entries: impl IntoIterator<Item = (&'a T, NonZeroUsize)>,
        equivalence: &E,
    ) -> Self {
        let mut result = Self {
            table: HashTable::new(),
            len: 0,
        };
        for (value, multiplicity) in entries {
            result.add(value, multiplicity.get(), equivalence);
        }
        result
    }

    fn add<E: Equivalence<T>>(&mut self, value: &'a T, count: usize, equivalence: &E) {
        let hash = equivalence.hash_of(value);
        match self.table.entry(
            hash,
            |(stored, _)| equivalence.equivalent(*stored, value),
            |(stored, _)| equivalence.hash_of(*stored),
        ) {
            Entry::Vacant(vacant) => {
                vacant.insert((value, count));
            }
            Entry::Occupied(mut occupied) => occupied.get_mut().1 += count,
        }
        self.len += count;
    }

    /// Multiplicity of `value`, zero if absent
    fn get<E: Equivalence<T>>(&self, value: &T, equivalence: &E) -> usize {
        let hash = equivalence.hash_of(value);
        self.table
            .find(hash, |(stored, _)| equivalence.equivalent(*stored, value))
            .map_or(0, |(_, multiplicity)| *multiplicity)
    }
}

impl<T, E: Equivalence<T>> Multiset<T, E> {
    /// Add every element of `other` to `self`.
    ///
    /// This is an additive union: if `self` contains `s` occurences of a value
    /// and `other` contains `o` occurences, then `self` ends up with `s + o`
    /// occurences. See [`max_union()`](Self::max_union) for the union that
    /// keeps the largest multiplicity instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut a = Multiset::from_iter(['a', 'b']);
    /// let b = Multiset::from_iter(['b', 'c']);
    /// a.union_with(&b);
    ///
    /// assert_eq!(a, Multiset::from_iter(['a', 'b', 'b', 'c']));
    /// ```
    pub fn union_with<'a, I>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        let old_len = self.len;
        for element in other {
            self.insert(element.clone());
        }
        trace!("union_with added {} elements", self.len - old_len);
        self
    }

    /// Only keep the elements of `self` that are also in `other`.
    ///
    /// If `self` contains `s` occurences of a value and `other` contains `o`
    /// occurences, then `self` ends up with `s.min(o)` occurences. Values that
    /// `other` does not contain are removed entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut a = Multiset::from_iter(['a', 'b', 'b', 'c']);
    /// a.intersect_with(&['b', 'c', 'c']);
    ///
    /// assert_eq!(a, Multiset::from_iter(['b', 'c']));
    /// ```
    pub fn intersect_with<'a, I>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let tally = Tally::new(other, &self.equivalence);
        let equivalence = &self.equivalence;
        self.table.retain(|entry| {
            entry.1 = entry.1.min(tally.get(&entry.0, equivalence));
            entry.1 > 0
        });
        let old_len = self.len;
        self.reset_len();
        trace!("intersect_with removed {} elements", old_len - self.len);
        self
    }

    /// Remove one occurence from `self` for every element of `other`.
    ///
    /// If `self` contains `s` occurences of a value and `other` contains `o`
    /// occurences, then `self` ends up with `s.saturating_sub(o)` occurences.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut a = Multiset::from_iter([1, 1, 2, 3]);
    /// a.except_with(&[1, 3, 3, 4]);
    ///
    /// assert_eq!(a, Multiset::from_iter([1, 2]));
    /// ```
    pub fn except_with<'a, I>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let old_len = self.len;
        for element in other {
            self.remove_up_to(element, 1);
        }
        trace!("except_with removed {} elements", old_len - self.len);
        self
    }

    /// Cancel out the occurences that `self` and `other` have in common, then
    /// add the occurences that only `other` has to `self`.
    ///
    /// If `self` contains `s` occurences of a value and `other` contains `o`
    /// occurences, then `self` ends up with `s.abs_diff(o)` occurences.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut a = Multiset::from_iter(['a', 'b', 'c']);
    /// a.symmetric_except_with(&['b', 'c', 'd']);
    ///
    /// assert_eq!(a, Multiset::from_iter(['a', 'd']));
    /// ```
    pub fn symmetric_except_with<'a, I>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        // Both sides must lose their shared occurences before the residue of
        // `other` is known, so this takes two passes.
        let mut residue = Tally::new(other, &self.equivalence);
        let mut cancelled = 0;
        for (value, count) in residue.table.iter_mut() {
            let shared = self.remove_up_to(*value, *count);
            *count -= shared;
            cancelled += shared;
        }
        residue.len -= cancelled;
        for (value, count) in residue.table.iter() {
            if let Some(count) = NonZeroUsize::new(*count) {
                self.insert_multiple((*value).clone(), count);
            }
        }
        trace!(
            "symmetric_except_with cancelled {cancelled} shared pairs and added {} elements",
            residue.len
        );
        self
    }

    /// Returns `true` if `self` is a subset of `other`, i.e. for every value
    /// in `self`, `other` holds at least as many occurences of that value.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let sup = Multiset::from_iter([1, 2, 2]);
    /// let mut set = Multiset::new();
    ///
    /// assert!(set.is_subset_of(&sup));
    /// set.insert(2);
    /// assert!(set.is_subset_of(&sup));
    /// set.insert(2);
    /// assert!(set.is_subset_of(&sup));
    /// set.insert(2);
    /// assert!(!set.is_subset_of(&sup));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn is_subset_of<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let tally = Tally::new(other, &self.equivalence);
        self.table
            .iter()
            .all(|(value, multiplicity)| *multiplicity <= tally.get(value, &self.equivalence))
    }

    /// Returns `true` if `self` is a subset of `other`, at least one value
    /// occurs more often in `other` than in `self`, and `other` holds more
    /// elements than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let small = Multiset::from_iter(['a', 'b']);
    /// let large = Multiset::from_iter(['a', 'b', 'c']);
    ///
    /// assert!(small.is_proper_subset_of(&large));
    /// assert!(!large.is_proper_subset_of(&small));
    /// assert!(!small.is_proper_subset_of(&small));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn is_proper_subset_of<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let tally = Tally::new(other, &self.equivalence);
        let mut found_larger = false;
        for &(ref value, multiplicity) in self.table.iter() {
            let other_multiplicity = tally.get(value, &self.equivalence);
            if multiplicity > other_multiplicity {
                return false;
            }
            found_larger |= multiplicity < other_multiplicity;
        }
        found_larger |= tally.table.iter().any(|(value, _)| !self.contains(value));
        found_larger && tally.len > self.len
    }

    /// Returns `true` if every distinct value of `other` is present in `self`.
    ///
    /// Unlike [`is_subset_of()`](Self::is_subset_of), this only checks for
    /// presence: multiplicities are not compared.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter([1, 2, 3]);
    ///
    /// assert!(set.is_superset_of(&[1, 2]));
    /// assert!(set.is_superset_of(&[2, 2, 2]));
    /// assert!(!set.is_superset_of(&[3, 4]));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn is_superset_of<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        other.into_iter().all(|value| self.contains(value))
    }

    /// Returns `true` if `self` is a superset of `other` in the presence-only
    /// sense of [`is_superset_of()`](Self::is_superset_of), at least one value
    /// occurs more often in `self` than in `other`, and `self` holds more
    /// elements than `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter([1, 1, 2]);
    ///
    /// assert!(set.is_proper_superset_of(&[1, 2]));
    /// assert!(!set.is_proper_superset_of(&[1, 1, 2]));
    /// assert!(!set.is_proper_superset_of(&[1, 2, 3]));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn is_proper_superset_of<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let tally = Tally::new(other, &self.equivalence);
        let mut found_smaller = false;
        for &(value, other_multiplicity) in tally.table.iter() {
            let multiplicity = self.multiplicity(value);
            if multiplicity == 0 {
                return false;
            }
            found_smaller |= other_multiplicity < multiplicity;
        }
        found_smaller |= self
            .table
            .iter()
            .any(|(value, _)| tally.get(value, &self.equivalence) == 0);
        found_smaller && self.len > tally.len
    }

    /// Returns `true` if `self` and `other` have at least one value in common.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter([1, 2, 2]);
    ///
    /// assert!(set.overlaps(&[2, 5]));
    /// assert!(!set.overlaps(&[3, 4]));
    /// assert!(!set.overlaps(&[]));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn overlaps<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        !self.is_empty() && other.into_iter().any(|value| self.contains(value))
    }

    /// Returns `true` if `self` and `other` contain the same values with the
    /// same multiplicities.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter(['a', 'b', 'b']);
    /// let mut other = Multiset::from_iter(['b', 'a', 'b']);
    ///
    /// assert!(set.multiset_equals(&other));
    /// other.remove_one(&'b');
    /// assert!(!set.multiset_equals(&other));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn multiset_equals<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let tally = Tally::new(other, &self.equivalence);
        // With equal totals, no value can hide in `other` without being
        // compensated by a mismatch on one of the values of `self`
        self.len == tally.len
            && self
                .table
                .iter()
                .all(|(value, multiplicity)| *multiplicity == tally.get(value, &self.equivalence))
    }
}

impl<T: Clone, E: Equivalence<T> + Clone> Multiset<T, E> {
    /// Returns the additive union of `self` and `other` as a new multiset,
    /// where each value occurs as many times as it does in `self` and `other`
    /// combined.
    ///
    /// The result uses the equivalence relation of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let a = Multiset::from_iter([1, 1, 2]);
    /// let b = Multiset::from_iter([2, 3]);
    /// assert_eq!(a.union(&b), Multiset::from_iter([1, 1, 2, 2, 3]));
    /// assert_eq!(&a + &b, a.union(&b));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn union<E2>(&self, other: &Multiset<T, E2>) -> Self {
        let mut result = self.clone();
        for (value, multiplicity) in other.entries() {
            result.insert_multiple(value.clone(), multiplicity);
        }
        result
    }

    /// Returns the difference of `self` and `other` as a new multiset, where
    /// each value occurs `s.saturating_sub(o)` times if it occurs `s` times in
    /// `self` and `o` times in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let a = Multiset::from_iter([1, 1, 2, 2, 3]);
    /// let b = Multiset::from_iter([2, 3, 4]);
    /// assert_eq!(a.difference(&b), Multiset::from_iter([1, 1, 2]));
    /// assert_eq!(&a - &b, a.difference(&b));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn difference<E2>(&self, other: &Multiset<T, E2>) -> Self {
        let mut result = self.clone();
        for (value, multiplicity) in other.entries() {
            result.remove_up_to(value, multiplicity.get());
        }
        result
    }

    /// Returns the intersection of `self` and `other` as a new multiset, where
    /// each value occurs `s.min(o)` times if it occurs `s` times in `self` and
    /// `o` times in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let a = Multiset::from_iter([1, 1, 2, 2, 3]);
    /// let b = Multiset::from_iter([2, 3, 4]);
    /// assert_eq!(a.intersection(&b), Multiset::from_iter([2, 3]));
    /// assert_eq!(&a * &b, a.intersection(&b));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn intersection<E2>(&self, other: &Multiset<T, E2>) -> Self {
        let tally = Tally::from_entries(other.entries(), &self.equivalence);
        let mut result = Self::with_equivalence(self.equivalence.clone());
        for &(ref value, multiplicity) in self.table.iter() {
            let shared = multiplicity.min(tally.get(value, &self.equivalence));
            if let Some(shared) = NonZeroUsize::new(shared) {
                result.insert_multiple(value.clone(), shared);
            }
        }
        result
    }

    /// Returns the union of `self` and `other` as a new multiset, without
    /// counting the occurences that both have in common twice: each value
    /// occurs `s.max(o)` times if it occurs `s` times in `self` and `o` times
    /// in `other`.
    ///
    /// See [`union()`](Self::union) for the additive union.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let a = Multiset::from_iter([1, 1, 2, 2, 3]);
    /// let b = Multiset::from_iter([2, 3, 4]);
    /// assert_eq!(a.max_union(&b), Multiset::from_iter([1, 1, 2, 2, 3, 4]));
    /// assert_eq!(&a | &b, a.max_union(&b));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn max_union<E2>(&self, other: &Multiset<T, E2>) -> Self {
        let tally = Tally::from_entries(other.entries(), &self.equivalence);
        let mut result = self.clone();
        for &(value, other_multiplicity) in tally.table.iter() {
            let missing = other_multiplicity.saturating_sub(self.multiplicity(value));
            if let Some(missing) = NonZeroUsize::new(missing) {
                result.insert_multiple(value.clone(), missing);
            }
        }
        result
    }

    /// Returns the symmetric difference of `self` and `other` as a new
    /// multiset, where each value occurs `s.abs_diff(o)` times if it occurs
    /// `s` times in `self` and `o` times in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let a = Multiset::from_iter([1, 1, 2, 2, 3]);
    /// let b = Multiset::from_iter([2, 3, 4]);
    /// assert_eq!(a.symmetric_difference(&b), Multiset::from_iter([1, 1, 2, 4]));
    /// assert_eq!(&a ^ &b, a.symmetric_difference(&b));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn symmetric_difference<E2>(&self, other: &Multiset<T, E2>) -> Self {
        let mut result = self.clone();
        result.symmetric_except_with(other);
        result
    }
}

impl<T: Clone, E: Equivalence<T> + Clone> Add<&Multiset<T, E>> for &Multiset<T, E> {
    type Output = Multiset<T, E>;

    /// Returns the additive union of `self` and `rhs` as a new `Multiset<T, E>`.
    #[must_use = "Only effect is to produce a result"]
    fn add(self, rhs: &Multiset<T, E>) -> Self::Output {
        self.union(rhs)
    }
}

impl<T: Clone, E: Equivalence<T> + Clone> Sub<&Multiset<T, E>> for &Multiset<T, E> {
    type Output = Multiset<T, E>;

    /// Returns the difference of `self` and `rhs` as a new `Multiset<T, E>`.
    #[must_use = "Only effect is to produce a result"]
    fn sub(self, rhs: &Multiset<T, E>) -> Self::Output {
        self.difference(rhs)
    }
}

impl<T: Clone, E: Equivalence<T> + Clone> Mul<&Multiset<T, E>> for &Multiset<T, E> {
    type Output = Multiset<T, E>;

    /// Returns the intersection of `self` and `rhs` as a new `Multiset<T, E>`.
    #[must_use = "Only effect is to produce a result"]
    fn mul(self, rhs: &Multiset<T, E>) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<T: Clone, E: Equivalence<T> + Clone> BitOr<&Multiset<T, E>> for &Multiset<T, E> {
    type Output = Multiset<T, E>;

    /// Returns the max-union of `self` and `rhs` as a new `Multiset<T, E>`.
    #[must_use = "Only effect is to produce a result"]
    fn bitor(self, rhs: &Multiset<T, E>) -> Self::Output {
        self.max_union(rhs)
    }
}

impl<T: Clone, E: Equivalence<T> + Clone> BitXor<&Multiset<T, E>> for &Multiset<T, E> {
    type Output = Multiset<T, E>;

    /// Returns the symmetric difference of `self` and `rhs` as a new
    /// `Multiset<T, E>`.
    #[must_use = "Only effect is to produce a result"]
    fn bitxor(self, rhs: &Multiset<T, E>) -> Self::Output {
        self.symmetric_difference(rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        FnEquivalence, KeyEquivalence,
        test::{contents, histogram, sorted_counts},
    };
    use proptest::prelude::*;

    fn check_any_set_pair(a_contents: &[u8], b_contents: &[u8]) {
        let a = a_contents.iter().copied().collect::<Multiset<_>>();
        let b = b_contents.iter().copied().collect::<Multiset<_>>();
        let (ha, hb) = (histogram(a_contents), histogram(b_contents));
        let count = |h: &std::collections::HashMap<u8, usize>, value: u8| {
            h.get(&value).copied().unwrap_or(0)
        };

        let union = &a + &b;
        let difference = &a - &b;
        let reverse_difference = &b - &a;
        let intersection = &a * &b;
        let max_union = &a | &b;
        let symmetric_difference = &a ^ &b;
        for value in 0u8..10 {
            let (sa, sb) = (count(&ha, value), count(&hb, value));
            assert_eq!(union[&value], sa + sb);
            assert_eq!(difference[&value], sa.saturating_sub(sb));
            assert_eq!(reverse_difference[&value], sb.saturating_sub(sa));
            assert_eq!(intersection[&value], sa.min(sb));
            assert_eq!(max_union[&value], sa.max(sb));
            assert_eq!(symmetric_difference[&value], sa.abs_diff(sb));
        }

        // Non-mutating operations leave their operands alone
        assert_eq!(a.len(), a_contents.len());
        assert_eq!(b.len(), b_contents.len());

        // Counting identities
        assert_eq!(union.len(), a.len() + b.len());
        assert_eq!(
            intersection.len() + difference.len() + reverse_difference.len(),
            max_union.len()
        );
        assert_eq!(
            difference.len() + reverse_difference.len(),
            symmetric_difference.len()
        );

        // Mutating operations agree with their value-returning counterparts,
        // whether the operand is a multiset or a plain slice
        let mut union_with = a.clone();
        union_with.union_with(&b);
        assert_eq!(union_with, union);
        let mut union_with_slice = a.clone();
        union_with_slice.union_with(b_contents);
        assert_eq!(union_with_slice, union);

        let mut intersect_with = a.clone();
        intersect_with.intersect_with(&b);
        assert_eq!(intersect_with, intersection);
        assert_eq!(intersect_with.len(), intersection.len());

        let mut except_with = a.clone();
        except_with.except_with(b_contents);
        assert_eq!(except_with, difference);

        let mut symmetric_except_with = a.clone();
        symmetric_except_with.symmetric_except_with(&b);
        assert_eq!(symmetric_except_with, symmetric_difference);
        assert_eq!(symmetric_except_with.len(), symmetric_difference.len());

        // Predicates match their definitions on histograms
        let values = 0u8..10;
        let subset = values.clone().all(|v| count(&ha, v) <= count(&hb, v));
        assert_eq!(a.is_subset_of(&b), subset);
        assert_eq!(a.is_subset_of(b_contents), subset);
        assert_eq!(
            a.is_proper_subset_of(&b),
            subset
                && values.clone().any(|v| count(&ha, v) < count(&hb, v))
                && b.len() > a.len()
        );

        let superset = values.clone().all(|v| count(&hb, v) == 0 || count(&ha, v) > 0);
        assert_eq!(a.is_superset_of(&b), superset);
        assert_eq!(a.is_superset_of(b_contents), superset);
        assert_eq!(
            a.is_proper_superset_of(&b),
            superset
                && values.clone().any(|v| count(&hb, v) < count(&ha, v))
                && a.len() > b.len()
        );

        assert_eq!(
            a.overlaps(&b),
            values.clone().any(|v| count(&ha, v) > 0 && count(&hb, v) > 0)
        );
        assert_eq!(a.overlaps(&b), !intersection.is_empty());

        let equal = values.clone().all(|v| count(&ha, v) == count(&hb, v));
        assert_eq!(a.multiset_equals(&b), equal);
        assert_eq!(a.multiset_equals(b_contents), equal);
        assert_eq!(a == b, equal);
        assert_eq!(a.is_subset_of(&b) && b.is_subset_of(&a), equal);
    }

    fn check_any_set(contents: &[u8]) {
        let set = contents.iter().copied().collect::<Multiset<_>>();
        let empty = Multiset::<u8>::new();

        // Idempotence
        let mut intersected = set.clone();
        intersected.intersect_with(&set);
        assert_eq!(intersected, set);
        let mut united = set.clone();
        united.union_with(&empty);
        assert_eq!(united, set);

        // Reflexive relations
        assert!(set.is_subset_of(&set));
        assert!(set.is_superset_of(&set));
        assert!(!set.is_proper_subset_of(&set));
        assert!(!set.is_proper_superset_of(&set));
        assert!(set.multiset_equals(&set));
        assert_eq!(set.overlaps(&set), !set.is_empty());

        // Relations with the empty multiset
        assert!(empty.is_subset_of(&set));
        assert!(set.is_superset_of(&empty));
        assert_eq!(empty.is_proper_subset_of(&set), !set.is_empty());
        assert_eq!(set.is_proper_superset_of(&empty), !set.is_empty());
        assert!(!set.overlaps(&empty));
        assert!(!empty.overlaps(&set));
    }

    #[test]
    fn union_with_accumulates() {
        let mut a = Multiset::from_iter(['a', 'b']);
        let b = Multiset::from_iter(['b', 'c']);
        a.union_with(&b);
        assert_eq!(a.len(), 4);
        assert_eq!(sorted_counts(&a), [('a', 1), ('b', 2), ('c', 1)]);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn intersect_with_keeps_minimum() {
        let mut a = Multiset::from_iter(['a', 'b', 'b', 'c']);
        let b = Multiset::from_iter(['b', 'c', 'c']);
        a.intersect_with(&b);
        assert_eq!(a.len(), 2);
        assert_eq!(sorted_counts(&a), [('b', 1), ('c', 1)]);
        assert!(!a.contains(&'a'));
    }

    #[test]
    fn except_with_clamps() {
        let mut a = Multiset::from_iter(['a', 'a', 'b']);
        a.except_with(&['a', 'b', 'b', 'b', 'z']);
        assert_eq!(sorted_counts(&a), [('a', 1)]);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn symmetric_except_with_cancels_shared() {
        let mut a = Multiset::from_iter(['a', 'b', 'c']);
        let b = Multiset::from_iter(['b', 'c', 'd']);
        a.symmetric_except_with(&b);
        assert_eq!(sorted_counts(&a), [('a', 1), ('d', 1)]);

        // Residues on both sides survive
        let mut a = Multiset::from_iter(['x', 'x', 'x', 'y']);
        a.symmetric_except_with(&['x', 'y', 'y', 'y']);
        assert_eq!(sorted_counts(&a), [('x', 2), ('y', 2)]);
    }

    #[test]
    fn proper_subset() {
        let small = Multiset::from_iter(['a', 'b']);
        let large = Multiset::from_iter(['a', 'b', 'c']);
        assert!(small.is_proper_subset_of(&large));
        assert!(!large.is_proper_subset_of(&small));
        assert!(large.is_proper_superset_of(&small));
        assert!(!small.is_proper_superset_of(&large));

        // Superset only checks presence
        let once = Multiset::from_iter(['a']);
        assert!(once.is_superset_of(&['a', 'a', 'a']));
        assert!(!once.is_proper_superset_of(&['a', 'a', 'a']));
        assert!(!once.is_subset_of(&['b']));
    }

    #[test]
    fn equality() {
        let a = Multiset::from_iter(['a', 'b', 'b']);
        let mut b = Multiset::from_iter(['b', 'a', 'b']);
        assert!(a.multiset_equals(&b));
        assert_eq!(a, b);
        b.remove_one(&'b');
        assert!(!a.multiset_equals(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn chaining() {
        let mut a = Multiset::from_iter([1, 2, 3]);
        a.union_with(&[4, 4])
            .except_with(&[1])
            .intersect_with(&[2, 4, 4, 4]);
        assert_eq!(sorted_counts(&a), [(2, 1), (4, 2)]);
    }

    #[test]
    fn receiver_equivalence_interprets_operands() {
        let case_insensitive = KeyEquivalence::new(|s: &String| s.to_lowercase());
        let words = ["Apple", "APPLE", "pear"].map(String::from);
        let mut set = Multiset::from_iter_with(words, case_insensitive);
        let other = ["apple", "Pear", "PEAR"].map(String::from);
        let natural = other.iter().cloned().collect::<Multiset<_>>();

        assert!(!set.multiset_equals(&natural));
        assert!(set.overlaps(&natural));
        assert!(set.is_superset_of(&other));
        assert_eq!(set.intersection(&natural).len(), 2);
        assert_eq!(set.max_union(&natural).len(), 4);
        assert_eq!(set.difference(&natural).len(), 1);

        // The natural multiset sees three distinct values where the receiver
        // only sees two
        assert_eq!(natural.num_values(), 3);
        set.intersect_with(&other);
        assert_eq!(set.len(), 2);
        assert_eq!(set.num_values(), 2);
        assert!(set.multiset_equals(&["apple".to_string(), "PEAR".to_string()]));

        // Same story with a relation given as a pair of closures
        let modulo = FnEquivalence::new(
            |a: &i32, b: &i32| a.rem_euclid(10) == b.rem_euclid(10),
            |x: &i32| x.rem_euclid(10) as u64,
        );
        let mut digits = Multiset::from_iter_with([1, 11, 21, 2, 3], modulo);
        digits.intersect_with(&[31, 41, 2, 2, 4]);
        assert_eq!(digits.len(), 3);
        assert_eq!(digits[&1], 2);
        assert_eq!(digits[&12], 1);
        assert!(!digits.contains(&3));

        digits.symmetric_except_with(&[51, 2, 2, 2, 5]);
        assert_eq!(digits.len(), 4);
        assert_eq!(digits[&1], 1);
        assert_eq!(digits[&2], 2);
        assert_eq!(digits[&15], 1);
        assert!(digits.multiset_equals(&[11, 22, 32, 45]));
        assert!(digits.is_proper_subset_of(&[1, 2, 2, 5, 5]));
        assert_eq!(digits.intersection(&Multiset::from_iter([12, 22, 5])).len(), 3);
    }

    proptest! {
        #[test]
        fn single(contents in contents()) {
            check_any_set(&contents);
            check_any_set_pair(&contents, &contents);
            check_any_set_pair(&contents, &[]);
            check_any_set_pair(&[], &contents);
        }

        #[test]
        fn pair(a in contents(), b in contents()) {
            check_any_set_pair(&a, &b);
        }

        #[test]
        fn symmetric_except_round_trip(a in contents(), b in contents()) {
            let original = a.iter().copied().collect::<Multiset<_>>();

            // Cancelling twice only restores values that `other` either lacks
            // or holds at least as many times as `original`
            let mut other = b.iter().copied().collect::<Multiset<_>>();
            for (value, multiplicity) in original.entries() {
                let missing = multiplicity.get().saturating_sub(other.multiplicity(value));
                if let Some(missing) = NonZeroUsize::new(missing) {
                    if other.contains(value) {
                        other.insert_multiple(*value, missing);
                    }
                }
            }

            let mut first = original.clone();
            first.symmetric_except_with(&other);
            let mut second = first.clone();
            second.symmetric_except_with(&other);
            prop_assert_eq!(second, original);
        }
    }
}
