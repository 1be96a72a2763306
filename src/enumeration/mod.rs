//! Sequences and the sessions that walk them
mod enumerable;
mod enumerator;
mod iter_enumerator;

pub use enumerable::{AdHocEnumerable, BoxedEnumerable, Enumerable, Enumeration};
pub use enumerator::{AdHocEnumerator, BoxedEnumerator, Enumerator};
pub use iter_enumerator::IterEnumerator;
