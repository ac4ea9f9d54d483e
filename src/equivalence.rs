//! Equivalence relations that decide when two elements count as "the same"
//! value inside of a [`Multiset`](crate::Multiset).
//!
//! A multiset never relies on the [`Eq`] and [`Hash`] implementations of its
//! element type directly. Every lookup goes through the [`Equivalence`] that
//! the multiset was built with, which makes it possible to store elements that
//! do not implement those traits, or to use a coarser notion of equality such
//! as case-insensitive string comparison.

use std::{
    fmt,
    hash::{BuildHasher, Hash, RandomState},
};

/// Equality relation paired with a compatible hash function
///
/// Implementations must uphold the usual hash table contract: if
/// `equivalent(a, b)` is `true`, then `hash_of(a) == hash_of(b)`. The relation
/// must also be reflexive, symmetric and transitive. Violating these rules will
/// not cause memory unsafety, but multiset operations will produce unspecified
/// results.
pub trait Equivalence<T: ?Sized> {
    /// Truth that `a` and `b` should be treated as the same value
    fn equivalent(&self, a: &T, b: &T) -> bool;

    /// Hash of `value`, consistent with [`equivalent()`](Self::equivalent)
    fn hash_of(&self, value: &T) -> u64;
}

impl<T: ?Sized, E: Equivalence<T> + ?Sized> Equivalence<T> for &E {
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (**self).equivalent(a, b)
    }

    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        (**self).hash_of(value)
    }
}

/// Natural equivalence of types that implement [`Eq`] and [`Hash`]
///
/// This is the default equivalence relation of [`Multiset`](crate::Multiset).
/// The `S` parameter selects the hashing algorithm, in the same way as it does
/// for the standard library's [`HashMap`](std::collections::HashMap).
///
/// # Examples
///
/// ```
/// use equivalence_multiset::{Equivalence, NaturalEq};
///
/// let eq = NaturalEq::new();
/// assert!(eq.equivalent(&1, &1));
/// assert!(!eq.equivalent(&1, &2));
/// assert_eq!(eq.hash_of(&1), eq.hash_of(&1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct NaturalEq<S = RandomState>(S);
//
impl NaturalEq {
    /// Natural equivalence using the standard library's default hasher
    #[must_use = "Only effect is to produce a result"]
    pub fn new() -> Self {
        Self(RandomState::new())
    }
}
//
impl<S> NaturalEq<S> {
    /// Natural equivalence using a specific hasher builder
    #[must_use = "Only effect is to produce a result"]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self(hash_builder)
    }

    /// Hasher builder used by this equivalence relation
    pub fn hasher(&self) -> &S {
        &self.0
    }
}
//
impl<T: Eq + Hash + ?Sized, S: BuildHasher> Equivalence<T> for NaturalEq<S> {
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        self.0.hash_one(value)
    }
}

/// Equivalence relation defined by a pair of closures
///
/// This is the most flexible way to build an equivalence relation, and the
/// closest analog to a runtime comparer object. Prefer [`KeyEquivalence`] when
/// your notion of equality amounts to comparing some projection of the
/// elements, since it cannot get the hash/equality consistency wrong.
///
/// # Examples
///
/// ```
/// use equivalence_multiset::{FnEquivalence, Multiset};
///
/// // Integers are considered equal modulo 10
/// let modulo = FnEquivalence::new(
///     |a: &i32, b: &i32| a.rem_euclid(10) == b.rem_euclid(10),
///     |x: &i32| x.rem_euclid(10) as u64,
/// );
/// let set = Multiset::from_iter_with([3, 13, 23, 4], modulo);
/// assert_eq!(set.multiplicity(&33), 3);
/// assert_eq!(set.num_values(), 2);
/// ```
#[derive(Clone, Copy)]
pub struct FnEquivalence<Q, H> {
    equals: Q,
    hash: H,
}
//
impl<Q, H> FnEquivalence<Q, H> {
    /// Build an equivalence relation from an equality predicate and a
    /// compatible hash function
    #[must_use = "Only effect is to produce a result"]
    pub fn new(equals: Q, hash: H) -> Self {
        Self { equals, hash }
    }
}
//
impl<T: ?Sized, Q, H> Equivalence<T> for FnEquivalence<Q, H>
where
    Q: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.equals)(a, b)
    }

    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        (self.hash)(value)
    }
}
//
impl<Q, H> fmt::Debug for FnEquivalence<Q, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEquivalence").finish_non_exhaustive()
    }
}

/// Equivalence relation that compares elements through a key projection
///
/// Two elements are equivalent when the keys extracted from them are equal
/// according to the key type's [`Eq`] implementation.
///
/// # Examples
///
/// ```
/// use equivalence_multiset::{KeyEquivalence, Multiset};
///
/// let case_insensitive = KeyEquivalence::new(|s: &String| s.to_lowercase());
/// let mut words = Multiset::with_equivalence(case_insensitive);
/// words.insert("Hello".to_string());
/// words.insert("HELLO".to_string());
/// words.insert("world".to_string());
///
/// assert_eq!(words.multiplicity(&"hello".to_string()), 2);
/// assert_eq!(words.len(), 3);
/// assert_eq!(words.num_values(), 2);
/// ```
#[derive(Clone, Copy)]
pub struct KeyEquivalence<F, S = RandomState> {
    key: F,
    hash_builder: S,
}
//
impl<F> KeyEquivalence<F> {
    /// Compare elements by the key returned by `key`, hashing keys with the
    /// standard library's default hasher
    #[must_use = "Only effect is to produce a result"]
    pub fn new(key: F) -> Self {
        Self::with_hasher(key, RandomState::new())
    }
}
//
impl<F, S> KeyEquivalence<F, S> {
    /// Compare elements by the key returned by `key`, hashing keys with
    /// `hash_builder`
    #[must_use = "Only effect is to produce a result"]
    pub fn with_hasher(key: F, hash_builder: S) -> Self {
        Self { key, hash_builder }
    }
}
//
impl<T: ?Sized, K, F, S> Equivalence<T> for KeyEquivalence<F, S>
where
    F: Fn(&T) -> K,
    K: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        self.hash_builder.hash_one((self.key)(value))
    }
}
//
impl<F, S: fmt::Debug> fmt::Debug for KeyEquivalence<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEquivalence")
            .field("hash_builder", &self.hash_builder)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn natural_eq_is_hash_consistent() {
        let eq = NaturalEq::new();
        for (a, b) in [("a", "a"), ("a", "b"), ("", "")] {
            if eq.equivalent(a, b) {
                assert_eq!(eq.hash_of(a), eq.hash_of(b));
            }
        }
        assert!(Equivalence::<str>::equivalent(&eq, "x", "x"));
        assert!(!Equivalence::<str>::equivalent(&eq, "x", "y"));
    }

    #[test]
    fn key_equivalence_projects() {
        let eq = KeyEquivalence::new(|s: &str| s.to_ascii_lowercase());
        assert!(eq.equivalent("ABC", "abc"));
        assert!(!eq.equivalent("ABC", "abd"));
        assert_eq!(eq.hash_of("ABC"), eq.hash_of("abc"));
    }

    #[test]
    fn references_forward() {
        fn halves<E: Equivalence<u8>>(eq: E) -> (bool, bool, bool) {
            (
                eq.equivalent(&4, &5),
                eq.equivalent(&5, &6),
                eq.hash_of(&4) == eq.hash_of(&5),
            )
        }
        let eq = FnEquivalence::new(|a: &u8, b: &u8| a / 2 == b / 2, |x: &u8| u64::from(x / 2));
        assert_eq!(halves(&eq), (true, false, true));
        assert_eq!(halves(eq), (true, false, true));
    }
}
