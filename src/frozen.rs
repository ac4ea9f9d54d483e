use crate::{Equivalence, Multiset, MultisetError};
use log::debug;
use std::{num::NonZeroUsize, ops::Deref};

/// A read-only [`Multiset`].
///
/// All queries, predicates and value-returning operations of [`Multiset`] are
/// available through [`Deref`]. The mutators are still callable, so that code
/// written against a mutable multiset keeps compiling, but they always fail
/// with [`MultisetError::Unsupported`] and never modify the contents.
///
/// This `struct` is created by the [`freeze()`](Multiset::freeze) method on
/// [`Multiset`].
///
/// # Examples
///
/// ```
/// use equivalence_multiset::{Multiset, MultisetError};
///
/// let mut frozen = Multiset::from_iter(['a', 'b', 'b']).freeze();
/// assert!(frozen.is_read_only());
/// assert_eq!(frozen[&'b'], 2);
///
/// assert!(matches!(
///     frozen.add('c', 1),
///     Err(MultisetError::Unsupported { operation: "add" })
/// ));
/// assert_eq!(frozen.len(), 3);
///
/// let mut thawed = frozen.thaw();
/// thawed.add('c', 1)?;
/// assert_eq!(thawed.len(), 4);
/// # Ok::<(), MultisetError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FrozenMultiset<T, E = crate::NaturalEq>(Multiset<T, E>);
//
impl<T, E> FrozenMultiset<T, E> {
    pub(crate) fn new(inner: Multiset<T, E>) -> Self {
        Self(inner)
    }

    /// Recover the mutable multiset
    #[must_use = "Only effect is to produce a result"]
    pub fn thaw(self) -> Multiset<T, E> {
        self.0
    }

    /// Truth that this multiset rejects mutations, which is always the case.
    #[must_use = "Only effect is to produce a result"]
    pub fn is_read_only(&self) -> bool {
        true
    }

    /// Always fails, as a frozen multiset cannot be cleared.
    pub fn clear(&mut self) -> Result<(), MultisetError> {
        Err(rejected("clear"))
    }
}

impl<T, E: Equivalence<T>> FrozenMultiset<T, E> {
    /// Always fails, as a frozen multiset cannot be added to.
    pub fn add(&mut self, _value: T, _count: usize) -> Result<&mut Self, MultisetError> {
        Err(rejected("add"))
    }

    /// Always fails, as a frozen multiset cannot be added to.
    pub fn insert_multiple(
        &mut self,
        _value: T,
        _count: NonZeroUsize,
    ) -> Result<Option<NonZeroUsize>, MultisetError> {
        Err(rejected("insert_multiple"))
    }

    /// Always fails, as elements cannot be removed from a frozen multiset.
    pub fn remove(&mut self, _value: &T, _count: usize) -> Result<&mut Self, MultisetError> {
        Err(rejected("remove"))
    }

    /// Always fails, as elements cannot be removed from a frozen multiset.
    pub fn remove_one(&mut self, _value: &T) -> Result<bool, MultisetError> {
        Err(rejected("remove_one"))
    }

    /// Always fails, as elements cannot be removed from a frozen multiset.
    pub fn remove_all(&mut self, _value: &T) -> Result<Option<NonZeroUsize>, MultisetError> {
        Err(rejected("remove_all"))
    }

    /// Always fails, as a frozen multiset cannot be added to.
    pub fn union_with<'a, I>(&mut self, _other: I) -> Result<&mut Self, MultisetError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        Err(rejected("union_with"))
    }

    /// Always fails, as elements cannot be removed from a frozen multiset.
    pub fn intersect_with<'a, I>(&mut self, _other: I) -> Result<&mut Self, MultisetError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        Err(rejected("intersect_with"))
    }

    /// Always fails, as elements cannot be removed from a frozen multiset.
    pub fn except_with<'a, I>(&mut self, _other: I) -> Result<&mut Self, MultisetError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        Err(rejected("except_with"))
    }

    /// Always fails, as a frozen multiset cannot be modified.
    pub fn symmetric_except_with<'a, I>(&mut self, _other: I) -> Result<&mut Self, MultisetError>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        Err(rejected("symmetric_except_with"))
    }
}

fn rejected(operation: &'static str) -> MultisetError {
    debug!("rejected `{operation}` on a read-only multiset");
    MultisetError::Unsupported { operation }
}

impl<T, E> Deref for FrozenMultiset<T, E> {
    type Target = Multiset<T, E>;

    fn deref(&self) -> &Multiset<T, E> {
        &self.0
    }
}

impl<T, E> AsRef<Multiset<T, E>> for FrozenMultiset<T, E> {
    fn as_ref(&self) -> &Multiset<T, E> {
        &self.0
    }
}

impl<T, E: Equivalence<T>> PartialEq for FrozenMultiset<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T, E: Equivalence<T>> Eq for FrozenMultiset<T, E> {}

impl<'a, T, E> IntoIterator for &'a FrozenMultiset<T, E> {
    type Item = &'a T;
    type IntoIter = crate::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
