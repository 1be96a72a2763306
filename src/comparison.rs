//! Ordering protocols and adapters that implement them with closures.

use std::cmp::Ordering;
use std::fmt;

use dyn_clone::{clone_box, DynClone};
use trait_set::trait_set;

/// A value that knows its position relative to values of type `T`
pub trait Comparable<T> {
  /// Where `self` falls relative to `other`
  fn compare_to(&self, other: &T) -> Ordering;
}

/// An ordering over `T` that lives outside of `T`.
///
/// Implementors are expected to provide a total order, but nothing in this
/// crate checks it.
pub trait Comparer<T> {
  /// Where `x` falls relative to `y`
  fn compare(&self, x: &T, y: &T) -> Ordering;

  /// The same ordering with the arguments swapped
  fn reversed(self) -> Reversed<Self>
  where Self: Sized {
    Reversed(self)
  }

  /// Sort a slice in place according to this ordering. The sort is stable.
  fn sort(&self, slice: &mut [T]) { slice.sort_by(|x, y| self.compare(x, y)) }

  /// Attach this ordering to a value so that it implements [Ord]
  fn wrap(&self, value: T) -> Compared<'_, T, Self> { Compared { value, comparer: self } }
}

trait_set! {
  trait CompareToFn<'a, T> = DynClone + Fn(&T) -> Ordering + 'a;
  trait CompareFn<'a, T> = DynClone + Fn(&T, &T) -> Ordering + 'a;
}

/// A [Comparable] that calls a function to compare itself with a value.
///
/// ```
/// use adhoc_impls::AdHocComparable;
///
/// let five = AdHocComparable::new(|other: &i32| 5.cmp(other));
/// assert!(five > 3 && five == 5);
/// ```
pub struct AdHocComparable<'a, T>(Box<dyn CompareToFn<'a, T>>);
impl<'a, T> AdHocComparable<'a, T> {
  /// Wrap a comparison against a fixed reference point
  pub fn new(compare: impl Fn(&T) -> Ordering + Clone + 'a) -> Self { Self(Box::new(compare)) }
}
impl<'a, T> Comparable<T> for AdHocComparable<'a, T> {
  fn compare_to(&self, other: &T) -> Ordering { (self.0)(other) }
}
impl<'a, T> PartialEq<T> for AdHocComparable<'a, T> {
  fn eq(&self, other: &T) -> bool { self.compare_to(other).is_eq() }
}
impl<'a, T> PartialOrd<T> for AdHocComparable<'a, T> {
  fn partial_cmp(&self, other: &T) -> Option<Ordering> { Some(self.compare_to(other)) }
}
impl<'a, T> Clone for AdHocComparable<'a, T> {
  fn clone(&self) -> Self { Self(clone_box(&*self.0)) }
}
impl<'a, T> fmt::Debug for AdHocComparable<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AdHocComparable") }
}

/// A [Comparer] that calls a two-argument function
pub struct AdHocComparer<'a, T>(Box<dyn CompareFn<'a, T>>);
impl<'a, T> AdHocComparer<'a, T> {
  /// Wrap an ordering function
  pub fn new(compare: impl Fn(&T, &T) -> Ordering + Clone + 'a) -> Self {
    Self(Box::new(compare))
  }
}
impl<'a, T> Comparer<T> for AdHocComparer<'a, T> {
  fn compare(&self, x: &T, y: &T) -> Ordering { (self.0)(x, y) }
}
impl<'a, T> Clone for AdHocComparer<'a, T> {
  fn clone(&self) -> Self { Self(clone_box(&*self.0)) }
}
impl<'a, T> fmt::Debug for AdHocComparer<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AdHocComparer") }
}

/// A [Comparer] with its arguments swapped, see [Comparer::reversed]
#[derive(Clone, Debug)]
pub struct Reversed<C>(pub C);
impl<T, C: Comparer<T>> Comparer<T> for Reversed<C> {
  fn compare(&self, x: &T, y: &T) -> Ordering { self.0.compare(y, x) }
}

/// A value ordered by an external [Comparer], so that it can be used in
/// [std::collections::BTreeSet], [std::collections::BinaryHeap],
/// [Iterator::max] and the like. Values paired with different comparers
/// shouldn't be mixed.
pub struct Compared<'c, T, C: ?Sized> {
  value: T,
  comparer: &'c C,
}
impl<'c, T, C: ?Sized> Compared<'c, T, C> {
  /// The wrapped value
  pub fn value(&self) -> &T { &self.value }
  /// Discard the comparer
  pub fn into_inner(self) -> T { self.value }
}
impl<'c, T, C: Comparer<T> + ?Sized> PartialEq for Compared<'c, T, C> {
  fn eq(&self, other: &Self) -> bool { self.cmp(other).is_eq() }
}
impl<'c, T, C: Comparer<T> + ?Sized> Eq for Compared<'c, T, C> {}
impl<'c, T, C: Comparer<T> + ?Sized> PartialOrd for Compared<'c, T, C> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
impl<'c, T, C: Comparer<T> + ?Sized> Ord for Compared<'c, T, C> {
  fn cmp(&self, other: &Self) -> Ordering { self.comparer.compare(&self.value, &other.value) }
}
impl<'c, T: fmt::Debug, C: ?Sized> fmt::Debug for Compared<'c, T, C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Compared").field(&self.value).finish()
  }
}

#[cfg(test)]
mod test {
  use std::cmp::Ordering;
  use std::collections::BTreeSet;

  use itertools::Itertools;

  use super::{AdHocComparable, AdHocComparer, Comparable, Comparer};

  #[test]
  fn comparable_passes_through() {
    let reference = 10;
    let cmp = |x: &i32, y: &i32| x.cmp(y);
    for y in [5, 10, 15] {
      let ordering = AdHocComparable::new(move |t: &i32| cmp(&reference, t));
      assert_eq!(ordering.compare_to(&y), cmp(&reference, &y), "compare_to({y})");
    }
  }

  #[test]
  fn comparable_works_with_operators() {
    let five = AdHocComparable::new(|other: &i32| 5.cmp(other));
    assert!(five > 3);
    assert!(five < 8);
    assert!(five == 5);
    assert!(five.clone() != 6, "clones compare the same way");
  }

  #[test]
  fn comparer_passes_through() {
    let by_len = AdHocComparer::new(|x: &&str, y: &&str| x.len().cmp(&y.len()));
    assert_eq!(by_len.compare(&"ab", &"c"), Ordering::Greater);
    assert_eq!(by_len.compare(&"ab", &"cd"), Ordering::Equal);
    assert_eq!(by_len.compare(&"", &"c"), Ordering::Less);
  }

  #[test]
  fn sort_and_reverse() {
    let by_len = AdHocComparer::new(|x: &&str, y: &&str| x.len().cmp(&y.len()));
    let mut words = vec!["ccc", "a", "bb", "dd"];
    by_len.sort(&mut words);
    assert_eq!(words, vec!["a", "bb", "dd", "ccc"], "sort is stable");
    by_len.clone().reversed().sort(&mut words);
    assert_eq!(words, vec!["ccc", "bb", "dd", "a"]);
  }

  #[test]
  fn compared_keys_std_collections() {
    let modulo = AdHocComparer::new(|x: &u32, y: &u32| (x % 10).cmp(&(y % 10)));
    let mut set = BTreeSet::new();
    for n in [13, 21, 3, 9] {
      set.insert(modulo.wrap(n));
    }
    let values = set.into_iter().map(|c| c.into_inner()).collect_vec();
    assert_eq!(values, vec![21, 13, 9], "13 and 3 are equivalent, insert keeps the first one");
    let max = [4, 19, 35].into_iter().map(|n| modulo.wrap(n)).max().map(|c| *c.value());
    assert_eq!(max, Some(19));
  }
}
