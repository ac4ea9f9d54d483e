//! A hash-based multiset implementation with a pluggable equivalence relation.
//!
//! This crate implements a kind of multiset, also known as a bag, which is a
//! generalization of the notion of mathematical set where multiple elements
//! that are equivalent to each other can be present simultaneously. Like many
//! multiset implementations, it does not store duplicate elements one by one.
//! It keeps one representative element per distinct value instead, along with
//! a count of how many times that value occurs.
//!
//! Our multiset implementation differs from other multiset implementations in
//! the following respects:
//!
//! - The notion of "same value" is not hardwired to the [`Eq`] and
//!   [`Hash`](std::hash::Hash) implementations of the element type. Every
//!   [`Multiset`] is built with an [`Equivalence`] relation, which defaults to
//!   the natural equality of the element type ([`NaturalEq`]) but can be
//!   replaced by any equality predicate paired with a compatible hash
//!   function. See the [`equivalence`] module for the options.
//!     * Operations involving two collections always interpret the other
//!       collection through the equivalence relation of the receiver, so the
//!       operand does not even need to be a multiset.
//! - It ships the full algebra of multiset operations, where multiplicities
//!   are combined element-wise rather than value-wise:
//!     * [`union_with()`](Multiset::union_with) and [`union()`](Multiset::union)
//!       add multiplicities together, while [`max_union()`](Multiset::max_union)
//!       keeps the largest multiplicity of each value.
//!     * [`intersect_with()`](Multiset::intersect_with) keeps the smallest
//!       multiplicity of each value.
//!     * [`except_with()`](Multiset::except_with) subtracts multiplicities,
//!       saturating at zero.
//!     * [`symmetric_except_with()`](Multiset::symmetric_except_with) cancels
//!       out the occurences that both sides have in common.
//!
//! Like hash-based collections of the standard library, this multiset is
//! unordered: iterating over it visits distinct values in an unspecified order.
//!
//! A read-only variant is available through [`Multiset::freeze()`]. Its
//! mutators are still callable, but always fail with
//! [`MultisetError::Unsupported`].

pub mod equivalence;
mod algebra;
mod error;
mod frozen;
mod iter;

pub use equivalence::{Equivalence, FnEquivalence, KeyEquivalence, NaturalEq};
pub use error::MultisetError;
pub use frozen::FrozenMultiset;
pub use iter::{Entries, Iter};

use hashbrown::{HashTable, hash_table::Entry};
use std::{
    collections::{HashMap, HashSet},
    fmt,
    hash::{BuildHasher, Hash},
    num::NonZeroUsize,
    ops::Index,
};

/// A hash-based multiset whose notion of equality is set by an [`Equivalence`]
/// relation.
///
/// You can learn more about the design rationale and overall capabilities of
/// this data structure in the [crate-level documentation](index.html).
///
/// In all the following documentation, we will use the following terminology:
///
/// - "values" refers to a unique value as defined by the multiset's
///   equivalence relation
/// - "elements" refers to possibly duplicate occurences of a value within the
///   multiset.
/// - "multiplicity" refers to the number of occurences of a value within the
///   multiset, i.e. the number of elements that are equivalent to this value.
///
/// When several equivalent elements are inserted, the multiset keeps the
/// first one as the representative of their value.
///
/// # Examples
///
/// ```
/// use equivalence_multiset::Multiset;
///
/// // Create a multiset
/// let mut set = Multiset::new();
///
/// // Inserting elements that do not exist yet is handled much like a standard
/// // library set type, except we return an Option instead of a boolean...
/// assert!(set.insert('a').is_none());
/// assert!(set.insert('b').is_none());
///
/// // ...which allows us to report the number of pre-existing elements, if any
/// assert_eq!(set.insert('a').map(|n| n.get()), Some(1));
///
/// // Multiplicities can be queried by method or by indexing
/// assert_eq!(set.multiplicity(&'a'), 2);
/// assert_eq!(set[&'b'], 1);
/// assert_eq!(set[&'z'], 0);
///
/// // Iterating over the multiset yields each element as many times as it
/// // occurs, in an unspecified order
/// let mut elements = set.iter().copied().collect::<Vec<_>>();
/// elements.sort();
/// assert_eq!(elements, ['a', 'a', 'b']);
/// ```
#[derive(Clone)]
pub struct Multiset<T, E = NaturalEq> {
    /// Distinct values with their multiplicities, which are never zero
    table: HashTable<(T, usize)>,

    /// Relation used to hash and compare values
    equivalence: E,

    /// Number of elements = sum of all multiplicities
    len: usize,
}
//
impl<T> Multiset<T> {
    /// Makes a new, empty `Multiset` that uses the natural equality of `T`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::<i32>::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn new() -> Self {
        Self::with_equivalence(NaturalEq::new())
    }

    /// Makes a new, empty `Multiset` that uses the natural equality of `T`
    /// and can hold at least `capacity` distinct values without reallocating.
    #[must_use = "Only effect is to produce a result"]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_equivalence(capacity, NaturalEq::new())
    }
}

impl<T, E> Multiset<T, E> {
    /// Makes a new, empty `Multiset` that decides which elements are equal
    /// using `equivalence`.
    ///
    /// The equivalence relation cannot be changed afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::{KeyEquivalence, Multiset};
    ///
    /// let mut set = Multiset::with_equivalence(KeyEquivalence::new(|x: &i32| x.abs()));
    /// set.insert(-3);
    /// set.insert(3);
    /// assert_eq!(set.multiplicity(&3), 2);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn with_equivalence(equivalence: E) -> Self {
        Self {
            table: HashTable::new(),
            equivalence,
            len: 0,
        }
    }

    /// Makes a new, empty `Multiset` with an explicit equivalence relation,
    /// which can hold at least `capacity` distinct values without
    /// reallocating.
    #[must_use = "Only effect is to produce a result"]
    pub fn with_capacity_and_equivalence(capacity: usize, equivalence: E) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            equivalence,
            len: 0,
        }
    }

    /// Equivalence relation used by this multiset
    pub fn equivalence(&self) -> &E {
        &self.equivalence
    }

    /// Clears the multiset, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut v = Multiset::from_iter([1, 2, 3]);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
        self.len = 0;
    }

    /// Number of elements currently present in the multiset, including
    /// duplicate occurences of a value.
    ///
    /// See also [`num_values()`](Self::num_values) for a count of distinct
    /// values, ignoring duplicate elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut v = Multiset::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// v.insert(1);
    /// assert_eq!(v.len(), 2);
    /// v.insert(2);
    /// assert_eq!(v.len(), 3);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of distinct values currently present in the multiset
    ///
    /// See also [`len()`](Self::len) for a count of multiset elements,
    /// including duplicates of each value.
    #[must_use = "Only effect is to produce a result"]
    pub fn num_values(&self) -> usize {
        self.table.len()
    }

    /// Truth that the multiset contains no elements
    #[must_use = "Only effect is to produce a result"]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Truth that this multiset rejects mutations, which is never the case.
    ///
    /// See [`freeze()`](Self::freeze) for a read-only variant.
    #[must_use = "Only effect is to produce a result"]
    pub fn is_read_only(&self) -> bool {
        false
    }

    /// Iterator over all elements of the multiset, where each value is
    /// repeated as many times as it occurs.
    ///
    /// Distinct values are visited in an unspecified order, which is stable
    /// as long as the multiset is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter([3, 1, 2, 2]);
    /// let mut elements = set.iter().copied().collect::<Vec<_>>();
    /// elements.sort();
    /// assert_eq!(elements, [1, 2, 2, 3]);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.table.iter(), self.len)
    }

    /// Iterator over all distinct values in the multiset, along with their
    /// multiplicities.
    ///
    /// See also [`values()`](Self::values) if you do not need to know how many
    /// occurences of each value are present.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter(['x', 'y', 'y']);
    /// let mut entries = set.entries()
    ///                      .map(|(value, multiplicity)| (*value, multiplicity.get()))
    ///                      .collect::<Vec<_>>();
    /// entries.sort();
    /// assert_eq!(entries, [('x', 1), ('y', 2)]);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn entries(&self) -> Entries<'_, T> {
        Entries(self.table.iter())
    }

    /// Iterator over all distinct values in the multiset.
    #[must_use = "Only effect is to produce a result"]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &T> {
        self.table.iter().map(|(value, _)| value)
    }

    /// Turn this multiset into a read-only one.
    ///
    /// The original multiset can be recovered with
    /// [`FrozenMultiset::thaw()`].
    #[must_use = "Only effect is to produce a result"]
    pub fn freeze(self) -> FrozenMultiset<T, E> {
        FrozenMultiset::new(self)
    }

    /// Update `self.len` to match `self.table` contents
    ///
    /// This `O(N)` operation should only be performed after bulk table
    /// operations that do not report how many elements they removed.
    fn reset_len(&mut self) {
        self.len = self.table.iter().map(|(_, multiplicity)| multiplicity).sum();
    }
}

impl<T, E: Equivalence<T>> Multiset<T, E> {
    /// Build a multiset from a sequence of elements, using an explicit
    /// equivalence relation.
    ///
    /// Each element of the sequence adds one occurence to its value.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::{KeyEquivalence, Multiset};
    ///
    /// let set = Multiset::from_iter_with(
    ///     ["apple", "Avocado", "banana"],
    ///     KeyEquivalence::new(|s: &&str| s.chars().next().map(|c| c.to_ascii_lowercase())),
    /// );
    /// assert_eq!(set.multiplicity(&"a"), 2);
    /// assert_eq!(set.multiplicity(&"b"), 1);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn from_iter_with(iter: impl IntoIterator<Item = T>, equivalence: E) -> Self {
        let mut result = Self::with_equivalence(equivalence);
        result.extend(iter);
        result
    }

    /// Returns `true` if the multiset contains at least one occurence of a
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter([1, 2, 2]);
    ///
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&2), true);
    /// assert_eq!(set.contains(&3), false);
    /// ```
    #[inline]
    #[must_use = "Only effect is to produce a result"]
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Returns the number of occurences of a value inside of the multiset,
    /// which is zero if this value is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter([1, 2, 2]);
    ///
    /// assert_eq!(set.multiplicity(&1), 1);
    /// assert_eq!(set.multiplicity(&2), 2);
    /// assert_eq!(set.multiplicity(&3), 0);
    /// ```
    #[inline]
    #[must_use = "Only effect is to produce a result"]
    pub fn multiplicity(&self, value: &T) -> usize {
        self.find(value).map_or(0, |(_, multiplicity)| *multiplicity)
    }

    /// Insert an element into the multiset, tell how many equivalent elements
    /// were already present in the multiset before insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut set = Multiset::new();
    ///
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// assert_eq!(set.insert(1), None);
    /// assert_eq!(set.insert(1), Some(nonzero(1)));
    /// assert_eq!(set.insert(1), Some(nonzero(2)));
    /// assert_eq!(set.insert(2), None);
    ///
    /// assert_eq!(set.len(), 4);
    /// assert_eq!(set.num_values(), 2);
    /// ```
    #[inline]
    pub fn insert(&mut self, value: T) -> Option<NonZeroUsize> {
        self.insert_multiple(value, NonZeroUsize::MIN)
    }

    /// Insert multiple copies of a value, tell how many equivalent elements
    /// were already present in the multiset.
    ///
    /// If an equivalent value is already present, `value` is dropped and the
    /// stored representative is kept.
    ///
    /// # Panics
    ///
    /// Panics if the total number of elements overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut set = Multiset::new();
    ///
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// assert_eq!(set.insert_multiple(1, nonzero(2)), None);
    /// assert_eq!(set.insert_multiple(1, nonzero(3)), Some(nonzero(2)));
    /// assert_eq!(set.insert_multiple(2, nonzero(2)), None);
    ///
    /// assert_eq!(set.len(), 7);
    /// assert_eq!(set.num_values(), 2);
    /// ```
    pub fn insert_multiple(&mut self, value: T, count: NonZeroUsize) -> Option<NonZeroUsize> {
        let new_len = self
            .len
            .checked_add(count.get())
            .expect("Element counter has overflown");
        let equivalence = &self.equivalence;
        let hash = equivalence.hash_of(&value);
        let entry = self.table.entry(
            hash,
            |(stored, _)| equivalence.equivalent(stored, &value),
            |(stored, _)| equivalence.hash_of(stored),
        );
        let result = match entry {
            Entry::Vacant(vacant) => {
                vacant.insert((value, count.get()));
                None
            }
            Entry::Occupied(mut occupied) => {
                // Cannot overflow, since multiplicities never exceed `len`
                let multiplicity = &mut occupied.get_mut().1;
                let old_multiplicity = *multiplicity;
                *multiplicity += count.get();
                NonZeroUsize::new(old_multiplicity)
            }
        };
        self.len = new_len;
        result
    }

    /// Add `count` occurences of `value` to the multiset.
    ///
    /// This is the checked counterpart of
    /// [`insert_multiple()`](Self::insert_multiple) for callers that hold a
    /// plain integer count. It returns the multiset itself so that calls can
    /// be chained.
    ///
    /// # Errors
    ///
    /// Fails with [`MultisetError::InvalidArgument`] if `count` is zero, or if
    /// adding `count` elements would overflow the total number of elements.
    /// In both cases the multiset is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::{Multiset, MultisetError};
    ///
    /// let mut set = Multiset::new();
    /// set.add('a', 1)?.add('b', 2)?.add('c', 3)?;
    /// assert_eq!(set.len(), 6);
    /// assert_eq!(set[&'c'], 3);
    ///
    /// assert!(matches!(
    ///     set.add('d', 0),
    ///     Err(MultisetError::InvalidArgument { .. })
    /// ));
    /// assert!(!set.contains(&'d'));
    /// # Ok::<(), MultisetError>(())
    /// ```
    pub fn add(&mut self, value: T, count: usize) -> Result<&mut Self, MultisetError> {
        let count = NonZeroUsize::new(count).ok_or(MultisetError::zero_count("count"))?;
        if self.len.checked_add(count.get()).is_none() {
            return Err(MultisetError::too_many_elements("count"));
        }
        self.insert_multiple(value, count);
        Ok(self)
    }

    /// Remove up to `count` occurences of `value` from the multiset.
    ///
    /// If the multiset holds `count` or fewer occurences of `value`, the value
    /// is removed entirely. Removing a value that is not present is not an
    /// error and does nothing.
    ///
    /// # Errors
    ///
    /// Fails with [`MultisetError::InvalidArgument`] if `count` is zero, in
    /// which case the multiset is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut set = Multiset::from_iter(['a', 'a', 'b', 'c', 'c', 'c']);
    /// set.remove(&'a', 1)?.remove(&'c', 2)?;
    /// assert_eq!(set.len(), 3);
    ///
    /// set.remove(&'b', 10)?;
    /// assert_eq!(set[&'b'], 0);
    /// assert!(!set.contains(&'b'));
    /// # Ok::<(), equivalence_multiset::MultisetError>(())
    /// ```
    pub fn remove(&mut self, value: &T, count: usize) -> Result<&mut Self, MultisetError> {
        if count == 0 {
            return Err(MultisetError::zero_count("count"));
        }
        self.remove_up_to(value, count);
        Ok(self)
    }

    /// Attempt to remove one occurence of `value`, tell whether the multiset
    /// was modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut set = Multiset::from_iter([1, 1, 2]);
    ///
    /// assert!(set.remove_one(&1));
    /// assert!(set.remove_one(&1));
    /// assert!(!set.remove_one(&1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn remove_one(&mut self, value: &T) -> bool {
        self.remove_up_to(value, 1) != 0
    }

    /// Remove all occurences of a value from the multiset, tell how many
    /// elements were removed if the value was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut set = Multiset::from_iter([1, 1, 2]);
    ///
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// assert_eq!(set.remove_all(&1), Some(nonzero(2)));
    /// assert_eq!(set.remove_all(&1), None);
    /// assert_eq!(set.remove_all(&2), Some(nonzero(1)));
    /// assert_eq!(set.remove_all(&2), None);
    /// ```
    pub fn remove_all(&mut self, value: &T) -> Option<NonZeroUsize> {
        let equivalence = &self.equivalence;
        let hash = equivalence.hash_of(value);
        let occupied = self
            .table
            .find_entry(hash, |(stored, _)| equivalence.equivalent(stored, value))
            .ok()?;
        let ((_, multiplicity), _) = occupied.remove();
        self.len -= multiplicity;
        NonZeroUsize::new(multiplicity)
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// The filtering callback `f` is not run once per element, but once per
    /// distinct value present inside of the multiset. It is also provided
    /// with the multiplicity of that value, which can be used as a filtering
    /// criterion.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut set = Multiset::from_iter([1usize, 1, 2, 3, 4, 4, 5, 5, 5]);
    /// // Keep even values with an even multiplicity
    /// // and odd values with an odd multiplicity.
    /// set.retain(|&value, multiplicity| value % 2 == multiplicity.get() % 2);
    ///
    /// assert_eq!(set, Multiset::from_iter([3, 4, 4, 5, 5, 5]));
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(&T, NonZeroUsize) -> bool) {
        self.table.retain(|entry| f(&entry.0, nonzero(entry.1)));
        self.reset_len();
    }

    /// Moves all elements from `other` into `self`, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let mut a = Multiset::from_iter([1, 1, 2, 3]);
    /// let mut b = Multiset::from_iter([3, 3, 4, 5]);
    ///
    /// a.append(&mut b);
    ///
    /// assert_eq!(a.len(), 8);
    /// assert_eq!(a[&3], 3);
    /// assert!(b.is_empty());
    /// ```
    pub fn append<E2>(&mut self, other: &mut Multiset<T, E2>) {
        for (value, multiplicity) in other.table.drain() {
            self.insert_multiple(value, nonzero(multiplicity));
        }
        other.len = 0;
    }

    /// Reserves capacity for at least `additional` more distinct values.
    pub fn reserve(&mut self, additional: usize) {
        let equivalence = &self.equivalence;
        self.table
            .reserve(additional, |(stored, _)| equivalence.hash_of(stored));
    }

    /// Shrinks the capacity of the multiset as much as possible.
    pub fn shrink_to_fit(&mut self) {
        let equivalence = &self.equivalence;
        self.table
            .shrink_to_fit(|(stored, _)| equivalence.hash_of(stored));
    }

    /// Stored entry for the value equivalent to `value`, if any
    fn find(&self, value: &T) -> Option<&(T, usize)> {
        let hash = self.equivalence.hash_of(value);
        self.table
            .find(hash, |(stored, _)| self.equivalence.equivalent(stored, value))
    }

    /// Remove up to `count` occurences of `value`, tell how many were removed
    fn remove_up_to(&mut self, value: &T, count: usize) -> usize {
        let equivalence = &self.equivalence;
        let hash = equivalence.hash_of(value);
        let Ok(mut occupied) = self
            .table
            .find_entry(hash, |(stored, _)| equivalence.equivalent(stored, value))
        else {
            return 0;
        };
        let multiplicity = occupied.get().1;
        let removed = if count >= multiplicity {
            let ((_, removed), _) = occupied.remove();
            removed
        } else {
            occupied.get_mut().1 -= count;
            count
        };
        self.len -= removed;
        removed
    }
}

impl<T: Clone, E: Equivalence<T> + Clone> Multiset<T, E> {
    /// Distinct values of the multiset, each with a multiplicity of one.
    ///
    /// The result is an independent multiset that uses the same equivalence
    /// relation.
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter(['a', 'b', 'b', 'c', 'c', 'c']);
    /// let distinct = set.to_set();
    /// assert_eq!(distinct.len(), 3);
    /// assert_eq!(distinct, Multiset::from_iter(['c', 'b', 'a']));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn to_set(&self) -> Self {
        let mut result = Self::with_capacity_and_equivalence(
            self.num_values(),
            self.equivalence.clone(),
        );
        for value in self.values() {
            result.insert(value.clone());
        }
        result
    }
}

impl<T: Clone, E> Multiset<T, E> {
    /// Snapshot of the distinct values of the multiset along with their
    /// multiplicities, in the same order as [`entries()`](Self::entries).
    #[must_use = "Only effect is to produce a result"]
    pub fn to_counts(&self) -> Vec<(T, NonZeroUsize)> {
        self.entries()
            .map(|(value, multiplicity)| (value.clone(), multiplicity))
            .collect()
    }
}

impl<T: Clone + Eq + Hash, S: BuildHasher + Clone> Multiset<T, NaturalEq<S>> {
    /// Distinct values of the multiset, as a standard library set
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let set = Multiset::from_iter([1, 2, 2]).to_hash_set();
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(&2));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn to_hash_set(&self) -> HashSet<T, S> {
        let mut result =
            HashSet::with_capacity_and_hasher(self.num_values(), self.equivalence.hasher().clone());
        result.extend(self.values().cloned());
        result
    }

    /// Mapping from distinct values to multiplicities, as a standard library
    /// map
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    ///
    /// let counts = Multiset::from_iter(['a', 'b', 'b']).to_hash_map();
    /// assert_eq!(counts[&'a'], 1);
    /// assert_eq!(counts[&'b'], 2);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn to_hash_map(&self) -> HashMap<T, usize, S> {
        let mut result =
            HashMap::with_capacity_and_hasher(self.num_values(), self.equivalence.hasher().clone());
        result.extend(
            self.table
                .iter()
                .map(|(value, multiplicity)| (value.clone(), *multiplicity)),
        );
        result
    }
}

/// Multiplicities stored in the table are never zero
fn nonzero(multiplicity: usize) -> NonZeroUsize {
    NonZeroUsize::new(multiplicity).expect("Stored multiplicities are never zero")
}

impl<T: fmt::Debug, E> fmt::Debug for Multiset<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.table.iter().map(|(value, multiplicity)| (value, multiplicity)))
            .finish()
    }
}

impl<T, E: Default> Default for Multiset<T, E> {
    fn default() -> Self {
        Self::with_equivalence(E::default())
    }
}

impl<T, E: Equivalence<T>> Extend<T> for Multiset<T, E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T, E: Equivalence<T>> Extend<(T, NonZeroUsize)> for Multiset<T, E> {
    /// More efficient alternative to [`Extend<T>`] for cases where you know in
    /// advance that you are going to insert several copies of a value
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut set = Multiset::from_iter([1, 2, 3]);
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// set.extend([(3, nonzero(3)), (4, nonzero(2))]);
    /// assert_eq!(set, Multiset::from_iter([1, 2, 3, 3, 3, 3, 4, 4]));
    /// ```
    fn extend<I: IntoIterator<Item = (T, NonZeroUsize)>>(&mut self, iter: I) {
        for (value, count) in iter {
            self.insert_multiple(value, count);
        }
    }
}

impl<T: Eq + Hash> FromIterator<T> for Multiset<T> {
    #[must_use = "Only effect is to produce a result"]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, NaturalEq::new())
    }
}

impl<T: Eq + Hash> FromIterator<(T, NonZeroUsize)> for Multiset<T> {
    /// More efficient alternative to [`FromIterator<T>`] for cases where you
    /// know in advance that you are going to insert several copies of a value
    ///
    /// # Examples
    ///
    /// ```
    /// use equivalence_multiset::Multiset;
    /// use std::num::NonZeroUsize;
    ///
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// assert_eq!(
    ///     Multiset::from_iter([1, 2, 2, 2, 3, 3]),
    ///     Multiset::from_iter([
    ///         (1, nonzero(1)),
    ///         (2, nonzero(3)),
    ///         (3, nonzero(2)),
    ///     ])
    /// );
    /// ```
    #[must_use = "Only effect is to produce a result"]
    fn from_iter<I: IntoIterator<Item = (T, NonZeroUsize)>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl<T, E: Equivalence<T>> Index<&T> for Multiset<T, E> {
    type Output = usize;

    /// Multiplicity of `value`, which is zero if it is not present
    fn index(&self, value: &T) -> &usize {
        self.find(value).map_or(&0, |(_, multiplicity)| multiplicity)
    }
}

impl<'a, T, E> IntoIterator for &'a Multiset<T, E> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[must_use = "Only effect is to produce a result"]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, E: Equivalence<T>> PartialEq for Multiset<T, E> {
    /// Multisets are equal when they hold the same values with the same
    /// multiplicities, according to the equivalence relation of `self`.
    ///
    /// See [`multiset_equals()`](Multiset::multiset_equals).
    #[must_use = "Only effect is to produce a result"]
    fn eq(&self, other: &Self) -> bool {
        self.multiset_equals(other)
    }
}

impl<T, E: Equivalence<T>> Eq for Multiset<T, E> {}
