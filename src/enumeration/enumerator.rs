//! The iteration session protocol and its closure-backed implementation.

use std::fmt;

use trait_set::trait_set;

/// A stateful cursor over a sequence, positioned before the first element
/// when created.
///
/// Unlike [Iterator], reading the current element and moving past it are
/// separate steps, and a session can optionally be rewound and must be
/// explicitly released.
pub trait Enumerator<T> {
  /// The element at the current position. Only meaningful after
  /// [Enumerator::advance] returned true.
  fn current(&self) -> T;
  /// Move to the next element. Returns false if the sequence is exhausted.
  fn advance(&mut self) -> bool;
  /// Return to the position before the first element. Does nothing by
  /// default.
  fn reset(&mut self) {}
  /// Release whatever the session holds. Does nothing by default. Using the
  /// session afterwards is a logic error.
  fn dispose(&mut self) {}
}

/// Type-erased [Enumerator]
pub type BoxedEnumerator<'a, T> = Box<dyn Enumerator<T> + 'a>;

impl<T, E: Enumerator<T> + ?Sized> Enumerator<T> for Box<E> {
  fn current(&self) -> T { (**self).current() }
  fn advance(&mut self) -> bool { (**self).advance() }
  fn reset(&mut self) { (**self).reset() }
  fn dispose(&mut self) { (**self).dispose() }
}

trait_set! {
  trait CurrentFn<'a, T> = Fn() -> T + 'a;
  trait AdvanceFn<'a> = FnMut() -> bool + 'a;
  trait HookFn<'a> = FnMut() + 'a;
}

/// An [Enumerator] whose every method calls a function supplied on
/// construction. The functions usually share state through a [std::rc::Rc].
///
/// `advance` is forwarded on every call, including after it has already
/// reported exhaustion. Wrap the session in an
/// [Enumeration](super::Enumeration) to get fused behaviour.
pub struct AdHocEnumerator<'a, T> {
  current: Box<dyn CurrentFn<'a, T>>,
  advance: Box<dyn AdvanceFn<'a>>,
  reset: Option<Box<dyn HookFn<'a>>>,
  dispose: Option<Box<dyn HookFn<'a>>>,
}
impl<'a, T> AdHocEnumerator<'a, T> {
  /// Session that can neither be rewound nor needs to be released
  pub fn new(current: impl Fn() -> T + 'a, advance: impl FnMut() -> bool + 'a) -> Self {
    Self { current: Box::new(current), advance: Box::new(advance), reset: None, dispose: None }
  }

  /// Session that can be rewound
  pub fn with_reset(
    current: impl Fn() -> T + 'a,
    advance: impl FnMut() -> bool + 'a,
    reset: impl FnMut() + 'a,
  ) -> Self {
    Self { reset: Some(Box::new(reset)), ..Self::new(current, advance) }
  }

  /// Session that has to be released
  pub fn with_dispose(
    current: impl Fn() -> T + 'a,
    advance: impl FnMut() -> bool + 'a,
    dispose: impl FnMut() + 'a,
  ) -> Self {
    Self { dispose: Some(Box::new(dispose)), ..Self::new(current, advance) }
  }

  /// Session that can be rewound and has to be released
  pub fn with_reset_and_dispose(
    current: impl Fn() -> T + 'a,
    advance: impl FnMut() -> bool + 'a,
    reset: impl FnMut() + 'a,
    dispose: impl FnMut() + 'a,
  ) -> Self {
    Self {
      reset: Some(Box::new(reset)),
      dispose: Some(Box::new(dispose)),
      ..Self::new(current, advance)
    }
  }

  /// Erase the type
  pub fn boxed(self) -> BoxedEnumerator<'a, T>
  where T: 'a {
    Box::new(self)
  }
}

impl<'a, T> Enumerator<T> for AdHocEnumerator<'a, T> {
  fn current(&self) -> T { (self.current)() }
  fn advance(&mut self) -> bool { (self.advance)() }
  fn reset(&mut self) {
    if let Some(reset) = &mut self.reset {
      reset()
    }
  }
  fn dispose(&mut self) {
    if let Some(dispose) = &mut self.dispose {
      dispose()
    }
  }
}

impl<'a, T> fmt::Debug for AdHocEnumerator<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AdHocEnumerator")
      .field("reset", &self.reset.is_some())
      .field("dispose", &self.dispose.is_some())
      .finish_non_exhaustive()
  }
}
