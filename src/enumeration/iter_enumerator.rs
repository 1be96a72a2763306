//! Standard iterators walked as iteration sessions.

use std::fmt;
use std::iter::Fuse;

use super::{BoxedEnumerator, Enumerator};

/// Drives a standard [Iterator] through the [Enumerator] protocol. The
/// iterator must be [Clone] so that a pristine copy can be kept for
/// [Enumerator::reset]. It is fused, so once [Enumerator::advance] returned
/// false it keeps returning false until the session is reset.
pub struct IterEnumerator<I: Iterator> {
  origin: Fuse<I>,
  iter: Fuse<I>,
  current: Option<I::Item>,
}
impl<I: Iterator + Clone> IterEnumerator<I> {
  /// Start a session positioned before the first element
  pub fn new(iter: impl IntoIterator<IntoIter = I, Item = I::Item>) -> Self {
    let origin = iter.into_iter().fuse();
    Self { iter: origin.clone(), origin, current: None }
  }

  /// Erase the type
  pub fn boxed<'a>(self) -> BoxedEnumerator<'a, I::Item>
  where
    I: 'a,
    I::Item: Clone,
  {
    Box::new(self)
  }
}

impl<I> Enumerator<I::Item> for IterEnumerator<I>
where
  I: Iterator + Clone,
  I::Item: Clone,
{
  fn current(&self) -> I::Item {
    (self.current.clone())
      .unwrap_or_else(|| panic!("IterEnumerator::current called without a successful advance"))
  }
  fn advance(&mut self) -> bool {
    self.current = self.iter.next();
    self.current.is_some()
  }
  fn reset(&mut self) {
    self.iter = self.origin.clone();
    self.current = None;
  }
}

impl<I: Iterator> fmt::Debug for IterEnumerator<I> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("IterEnumerator").field("positioned", &self.current.is_some()).finish()
  }
}
