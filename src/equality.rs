//! Equality protocols and adapters that implement them with closures.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

use dyn_clone::{clone_box, DynClone};
use hashbrown::HashSet;
use trait_set::trait_set;

/// A value that can tell whether it's equal to values of type `T`
pub trait Equatable<T> {
  /// Whether `self` equals `other`
  fn equals(&self, other: &T) -> bool;
}

/// An equivalence relation over `T` that lives outside of `T`, along with a
/// hash function consistent with it. Values that are equal must hash the
/// same, but nothing in this crate checks it.
pub trait EqualityComparer<T> {
  /// Whether `x` and `y` are equivalent
  fn equals(&self, x: &T, y: &T) -> bool;
  /// Digest of `x`
  fn hash(&self, x: &T) -> u64;

  /// Attach this relation to a value so that it implements [Eq] and [Hash]
  fn wrap(&self, value: T) -> Keyed<'_, T, Self> { Keyed { value, comparer: self } }

  /// Keep the first element of every equivalence class, in order
  fn distinct(&self, iter: impl IntoIterator<Item = T>) -> Vec<T>
  where T: Clone {
    let mut seen = HashSet::new();
    iter.into_iter().filter(|t| seen.insert(self.wrap(t.clone()))).collect()
  }
}

trait_set! {
  trait EqualsToFn<'a, T> = DynClone + Fn(&T) -> bool + 'a;
  trait EqualsFn<'a, T> = DynClone + Fn(&T, &T) -> bool + 'a;
  trait HashFn<'a, T> = DynClone + Fn(&T) -> u64 + 'a;
}

/// An [Equatable] that calls a function to compare itself with a value
pub struct AdHocEquatable<'a, T>(Box<dyn EqualsToFn<'a, T>>);
impl<'a, T> AdHocEquatable<'a, T> {
  /// Wrap an equality test against a fixed reference point
  pub fn new(equals: impl Fn(&T) -> bool + Clone + 'a) -> Self { Self(Box::new(equals)) }
}
impl<'a, T> Equatable<T> for AdHocEquatable<'a, T> {
  fn equals(&self, other: &T) -> bool { (self.0)(other) }
}
impl<'a, T> PartialEq<T> for AdHocEquatable<'a, T> {
  fn eq(&self, other: &T) -> bool { self.equals(other) }
}
impl<'a, T> Clone for AdHocEquatable<'a, T> {
  fn clone(&self) -> Self { Self(clone_box(&*self.0)) }
}
impl<'a, T> fmt::Debug for AdHocEquatable<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AdHocEquatable") }
}

/// An [EqualityComparer] that calls an equality and a hash function.
///
/// The hash function can be omitted for types that implement [Hash], in
/// which case the type's own implementation is used.
pub struct AdHocEqualityComparer<'a, T> {
  equals: Box<dyn EqualsFn<'a, T>>,
  hash: Box<dyn HashFn<'a, T>>,
}
impl<'a, T> AdHocEqualityComparer<'a, T> {
  /// Wrap an equality function and a matching hash function
  pub fn new(
    equals: impl Fn(&T, &T) -> bool + Clone + 'a,
    hash: impl Fn(&T) -> u64 + Clone + 'a,
  ) -> Self {
    Self { equals: Box::new(equals), hash: Box::new(hash) }
  }

  /// Hash with the [Hash] impl of `T` through a [DefaultHasher] created with
  /// [DefaultHasher::new], so digests are stable within a build
  pub fn with_default_hash(equals: impl Fn(&T, &T) -> bool + Clone + 'a) -> Self
  where T: Hash {
    Self::with_hasher(equals, BuildHasherDefault::<DefaultHasher>::default())
  }

  /// Hash with the [Hash] impl of `T` through hashers built by `hasher`
  pub fn with_hasher(
    equals: impl Fn(&T, &T) -> bool + Clone + 'a,
    hasher: impl BuildHasher + Clone + 'a,
  ) -> Self
  where T: Hash {
    Self::new(equals, move |t: &T| hasher.hash_one(t))
  }
}
impl<'a, T> EqualityComparer<T> for AdHocEqualityComparer<'a, T> {
  fn equals(&self, x: &T, y: &T) -> bool { (self.equals)(x, y) }
  fn hash(&self, x: &T) -> u64 { (self.hash)(x) }
}
impl<'a, T> Clone for AdHocEqualityComparer<'a, T> {
  fn clone(&self) -> Self {
    Self { equals: clone_box(&*self.equals), hash: clone_box(&*self.hash) }
  }
}
impl<'a, T> fmt::Debug for AdHocEqualityComparer<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AdHocEqualityComparer") }
}

/// A value compared and hashed by an external [EqualityComparer], so that it
/// can be used as a key in [hashbrown::HashMap] or [std::collections::HashMap].
/// Values paired with different comparers shouldn't be mixed.
pub struct Keyed<'c, T, C: ?Sized> {
  value: T,
  comparer: &'c C,
}
impl<'c, T, C: ?Sized> Keyed<'c, T, C> {
  /// The wrapped value
  pub fn value(&self) -> &T { &self.value }
  /// Discard the comparer
  pub fn into_inner(self) -> T { self.value }
}
impl<'c, T, C: EqualityComparer<T> + ?Sized> PartialEq for Keyed<'c, T, C> {
  fn eq(&self, other: &Self) -> bool { self.comparer.equals(&self.value, &other.value) }
}
impl<'c, T, C: EqualityComparer<T> + ?Sized> Eq for Keyed<'c, T, C> {}
impl<'c, T, C: EqualityComparer<T> + ?Sized> Hash for Keyed<'c, T, C> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_u64(EqualityComparer::hash(self.comparer, &self.value))
  }
}
impl<'c, T: fmt::Debug, C: ?Sized> fmt::Debug for Keyed<'c, T, C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Keyed").field(&self.value).finish()
  }
}
