//! Keyed groups of elements and collections of such groups.

use std::cell::Cell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use dyn_clone::{clone_box, DynClone};
use hashbrown::HashMap;
use itertools::Itertools;
use trait_set::trait_set;

use crate::enumeration::{
  AdHocEnumerable, AdHocEnumerator, BoxedEnumerable, BoxedEnumerator, Enumerable,
};

/// A sequence of elements that share a key
pub trait Grouping<'a, K, E>: Enumerable<'a, E> {
  /// The key shared by the elements
  fn key(&self) -> K;
}

/// Type-erased [Grouping]
pub type BoxedGrouping<'a, K, E> = Box<dyn Grouping<'a, K, E> + 'a>;

/// A sequence of [Grouping]s that can also be queried by key
pub trait Lookup<'a, K, E>: Enumerable<'a, BoxedGrouping<'a, K, E>> {
  /// Whether there is a group for `key`
  fn contains(&self, key: &K) -> bool;
  /// Number of groups
  fn count(&self) -> usize;
  /// The elements in the group for `key`
  fn get(&self, key: &K) -> BoxedEnumerable<'a, E>;
}

trait_set! {
  trait KeyFn<'a, K> = DynClone + Fn() -> K + 'a;
  trait ContainsFn<'a, K> = DynClone + Fn(&K) -> bool + 'a;
  trait CountFn<'a> = DynClone + Fn() -> usize + 'a;
  trait IndexFn<'a, K, E> = DynClone + Fn(&K) -> BoxedEnumerable<'a, E> + 'a;
}

/// A [Grouping] that calls a function for its key and another one to start
/// sessions over its elements
pub struct AdHocGrouping<'a, K, E> {
  key: Box<dyn KeyFn<'a, K>>,
  elements: AdHocEnumerable<'a, E>,
}
impl<'a, K, E> AdHocGrouping<'a, K, E> {
  /// Wrap a key getter and a session factory
  pub fn new(
    key: impl Fn() -> K + Clone + 'a,
    make_session: impl Fn() -> BoxedEnumerator<'a, E> + Clone + 'a,
  ) -> Self {
    Self::with_elements(key, AdHocEnumerable::new(make_session))
  }

  /// Wrap a key getter and an existing sequence
  pub fn with_elements(
    key: impl Fn() -> K + Clone + 'a,
    elements: AdHocEnumerable<'a, E>,
  ) -> Self {
    Self { key: Box::new(key), elements }
  }

  /// Erase the type
  pub fn boxed(self) -> BoxedGrouping<'a, K, E>
  where
    K: 'a,
    E: 'a,
  {
    Box::new(self)
  }
}
impl<'a, K, E> Enumerable<'a, E> for AdHocGrouping<'a, K, E> {
  fn enumerate(&self) -> BoxedEnumerator<'a, E> { self.elements.enumerate() }
}
impl<'a, K, E> Grouping<'a, K, E> for AdHocGrouping<'a, K, E> {
  fn key(&self) -> K { (self.key)() }
}
impl<'a, K, E> Clone for AdHocGrouping<'a, K, E> {
  fn clone(&self) -> Self { Self { key: clone_box(&*self.key), elements: self.elements.clone() } }
}
impl<'a, K, E> fmt::Debug for AdHocGrouping<'a, K, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AdHocGrouping") }
}

/// A [Lookup] whose every method calls a function supplied on construction.
///
/// The functions are not checked against each other. If `contains` says yes
/// but the indexer returns nothing, that is what the caller gets.
pub struct AdHocLookup<'a, K, E> {
  contains: Box<dyn ContainsFn<'a, K>>,
  count: Box<dyn CountFn<'a>>,
  indexer: Box<dyn IndexFn<'a, K, E>>,
  groups: AdHocEnumerable<'a, BoxedGrouping<'a, K, E>>,
}
impl<'a, K, E> AdHocLookup<'a, K, E> {
  /// Wrap a membership test, a group counter, an indexer and a factory for
  /// sessions over the groups
  pub fn new(
    contains: impl Fn(&K) -> bool + Clone + 'a,
    count: impl Fn() -> usize + Clone + 'a,
    indexer: impl Fn(&K) -> BoxedEnumerable<'a, E> + Clone + 'a,
    make_session: impl Fn() -> BoxedEnumerator<'a, BoxedGrouping<'a, K, E>> + Clone + 'a,
  ) -> Self {
    Self {
      contains: Box::new(contains),
      count: Box::new(count),
      indexer: Box::new(indexer),
      groups: AdHocEnumerable::new(make_session),
    }
  }

  /// Group `(key, element)` pairs by key. Groups appear in the order their
  /// keys were first seen, elements in input order. Indexing with a missing
  /// key yields an empty sequence.
  pub fn from_pairs(pairs: impl IntoIterator<Item = (K, E)>) -> Self
  where
    K: Eq + Hash + Clone + 'a,
    E: Clone + 'a,
  {
    let pairs = pairs.into_iter().collect_vec();
    let order = Rc::new(pairs.iter().map(|(k, _)| k.clone()).unique().collect_vec());
    let mut groups = HashMap::<K, Vec<E>>::new();
    for (k, e) in pairs {
      groups.entry(k).or_default().push(e)
    }
    let groups = Rc::new(groups);
    let contains = {
      let groups = groups.clone();
      move |k: &K| groups.contains_key(k)
    };
    let count = {
      let order = order.clone();
      move || order.len()
    };
    let indexer = {
      let groups = groups.clone();
      move |k: &K| elements_of(groups.get(k).cloned().unwrap_or_default()).boxed()
    };
    let make_session = move || {
      let pos = Rc::new(Cell::new(0usize));
      let (p1, p2, p3) = (pos.clone(), pos.clone(), pos);
      let (groups, order) = (groups.clone(), order.clone());
      let len = order.len();
      let current = move || -> BoxedGrouping<'a, K, E> {
        let key = (p1.get().checked_sub(1).and_then(|i| order.get(i)))
          .unwrap_or_else(|| panic!("AdHocLookup group read without a successful advance"))
          .clone();
        let elements = elements_of(groups[&key].clone());
        AdHocGrouping::with_elements(move || key.clone(), elements).boxed()
      };
      let advance = move || {
        let next = p2.get() + 1;
        (next <= len).then(|| p2.set(next)).is_some()
      };
      AdHocEnumerator::with_reset(current, advance, move || p3.set(0)).boxed()
    };
    Self::new(contains, count, indexer, make_session)
  }
}
impl<'a, K, E> Enumerable<'a, BoxedGrouping<'a, K, E>> for AdHocLookup<'a, K, E> {
  fn enumerate(&self) -> BoxedEnumerator<'a, BoxedGrouping<'a, K, E>> {
    self.groups.enumerate()
  }
}
impl<'a, K, E> Lookup<'a, K, E> for AdHocLookup<'a, K, E> {
  fn contains(&self, key: &K) -> bool { (self.contains)(key) }
  fn count(&self) -> usize { (self.count)() }
  fn get(&self, key: &K) -> BoxedEnumerable<'a, E> { (self.indexer)(key) }
}
impl<'a, K, E> Clone for AdHocLookup<'a, K, E> {
  fn clone(&self) -> Self {
    Self {
      contains: clone_box(&*self.contains),
      count: clone_box(&*self.count),
      indexer: clone_box(&*self.indexer),
      groups: self.groups.clone(),
    }
  }
}
impl<'a, K, E> fmt::Debug for AdHocLookup<'a, K, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AdHocLookup") }
}

fn elements_of<'a, E: Clone + 'a>(elements: Vec<E>) -> AdHocEnumerable<'a, E> {
  AdHocEnumerable::from_iter_fn(move || elements.clone())
}
