//! An alternative to `Iterable` in many languages, a [Fn] that returns an
//! [Enumerator].

use std::fmt;
use std::iter::FusedIterator;

use dyn_clone::{clone_box, DynClone};
use trait_set::trait_set;

use super::{BoxedEnumerator, Enumerator, IterEnumerator};

/// A value that can start any number of independent iteration sessions
pub trait Enumerable<'a, T> {
  /// Start a new session positioned before the first element
  fn enumerate(&self) -> BoxedEnumerator<'a, T>;
  /// Start a new session and drive it as an [Iterator]
  fn iter(&self) -> Enumeration<'a, T> { Enumeration::new(self.enumerate()) }
}

/// Type-erased [Enumerable]
pub type BoxedEnumerable<'a, T> = Box<dyn Enumerable<'a, T> + 'a>;

impl<'a, T, E: Enumerable<'a, T> + ?Sized> Enumerable<'a, T> for Box<E> {
  fn enumerate(&self) -> BoxedEnumerator<'a, T> { (**self).enumerate() }
}

trait_set! {
  trait Factory<'a, T> = DynClone + Fn() -> BoxedEnumerator<'a, T> + 'a;
}

/// Dynamic session building callback. Each call to [Enumerable::enumerate]
/// invokes the callback once, so sessions are as independent as the callback
/// makes them.
pub struct AdHocEnumerable<'a, T>(Box<dyn Factory<'a, T>>);
impl<'a, T> AdHocEnumerable<'a, T> {
  /// Construct from a function that starts a session
  pub fn new(make_session: impl Fn() -> BoxedEnumerator<'a, T> + Clone + 'a) -> Self {
    Self(Box::new(make_session))
  }

  /// Construct from a concrete function returning a concrete iterator
  pub fn from_iter_fn<I>(f: impl Fn() -> I + Clone + 'a) -> Self
  where
    I: IntoIterator<Item = T>,
    I::IntoIter: Clone + 'a,
    T: Clone + 'a,
  {
    Self::new(move || Box::new(IterEnumerator::new(f())) as BoxedEnumerator<'a, T>)
  }

  /// Erase the type
  pub fn boxed(self) -> BoxedEnumerable<'a, T>
  where T: 'a {
    Box::new(self)
  }
}
impl<'a, T> Enumerable<'a, T> for AdHocEnumerable<'a, T> {
  fn enumerate(&self) -> BoxedEnumerator<'a, T> { (self.0)() }
}
impl<'a, T> Clone for AdHocEnumerable<'a, T> {
  fn clone(&self) -> Self { Self(clone_box(&*self.0)) }
}
impl<'a, T> fmt::Debug for AdHocEnumerable<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AdHocEnumerable") }
}
impl<'a, 'b, T> IntoIterator for &'b AdHocEnumerable<'a, T> {
  type IntoIter = Enumeration<'a, T>;
  type Item = T;
  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Drives an [Enumerator] as an [Iterator], the way a `for` loop would.
///
/// Once the session reports exhaustion it is not advanced again. The session
/// is disposed exactly once, when the [Enumeration] is dropped.
pub struct Enumeration<'a, T> {
  session: BoxedEnumerator<'a, T>,
  done: bool,
}
impl<'a, T> Enumeration<'a, T> {
  /// Take ownership of a fresh session
  pub fn new(session: BoxedEnumerator<'a, T>) -> Self { Self { session, done: false } }
}
impl<'a, T> Iterator for Enumeration<'a, T> {
  type Item = T;
  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    if self.session.advance() {
      Some(self.session.current())
    } else {
      self.done = true;
      None
    }
  }
}
impl<'a, T> FusedIterator for Enumeration<'a, T> {}
impl<'a, T> fmt::Debug for Enumeration<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Enumeration").field("done", &self.done).finish_non_exhaustive()
  }
}
impl<'a, T> Drop for Enumeration<'a, T> {
  fn drop(&mut self) { self.session.dispose() }
}

#[cfg(test)]
mod test {
  use std::cell::Cell;
  use std::rc::Rc;

  use itertools::Itertools;

  use super::{AdHocEnumerable, Enumerable};
  use crate::enumeration::{AdHocEnumerator, BoxedEnumerator, Enumerator};

  /// Counts from 1 to 3 in a fresh session every time, tallying starts and
  /// disposals
  fn tracked() -> (Rc<Cell<usize>>, Rc<Cell<usize>>, AdHocEnumerable<'static, usize>) {
    let (started, disposed) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
    let (s, d) = (started.clone(), disposed.clone());
    let seq = AdHocEnumerable::new(move || -> BoxedEnumerator<'static, usize> {
      s.set(s.get() + 1);
      let pos = Rc::new(Cell::new(0));
      let (p1, p2, d) = (pos.clone(), pos, d.clone());
      let advance = move || {
        let next = p2.get() + 1;
        (next <= 3).then(|| p2.set(next)).is_some()
      };
      AdHocEnumerator::with_dispose(move || p1.get(), advance, move || d.set(d.get() + 1))
        .boxed()
    });
    (started, disposed, seq)
  }

  #[test]
  fn sessions_are_independent() {
    let (started, _, seq) = tracked();
    let mut a = seq.enumerate();
    let mut b = seq.enumerate();
    assert_eq!(started.get(), 2, "the factory runs once per session");
    a.advance();
    a.advance();
    b.advance();
    assert_eq!(a.current(), 2);
    assert_eq!(b.current(), 1, "advancing one session doesn't move the other");
  }

  #[test]
  fn iteration_disposes_once() {
    let (_, disposed, seq) = tracked();
    assert_eq!(seq.iter().collect_vec(), vec![1, 2, 3]);
    assert_eq!(disposed.get(), 1, "a full walk disposes once");
    assert_eq!(seq.iter().take(1).collect_vec(), vec![1]);
    assert_eq!(disposed.get(), 2, "an abandoned walk is disposed too");
    let session = seq.enumerate();
    drop(session);
    assert_eq!(disposed.get(), 2, "a raw session is never disposed implicitly");
  }

  #[test]
  fn enumeration_is_fused() {
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    let seq = AdHocEnumerable::new(move || {
      let c = c.clone();
      AdHocEnumerator::new(|| (), move || {
        c.set(c.get() + 1);
        false
      })
      .boxed()
    });
    let mut iter = seq.iter();
    assert_eq!(format!("{iter:?}"), "Enumeration { done: false, .. }");
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
    assert_eq!(calls.get(), 1, "advance isn't called after exhaustion");
    assert_eq!(format!("{iter:?}"), "Enumeration { done: true, .. }");
  }

  #[test]
  fn from_iter_fn_and_for_loops() {
    let seq = AdHocEnumerable::from_iter_fn(|| vec!['x', 'y']);
    let mut seen = String::new();
    for c in &seq {
      seen.push(c);
    }
    for c in &seq.clone() {
      seen.push(c);
    }
    assert_eq!(seen, "xyxy", "every loop starts from the beginning");
  }

  #[test]
  fn boxed_enumerable_forwards() {
    let seq = AdHocEnumerable::from_iter_fn(|| 0..3).boxed();
    assert_eq!(seq.iter().sum::<i32>(), 3);
  }
}
