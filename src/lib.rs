#![warn(missing_docs)]
//! Implementations of the common collection protocols (ordering, equality,
//! enumeration, grouping and lookup) assembled from closures at the use site,
//! so that a one-off comparison or sequence doesn't need a named type.
//!
//! Every adapter forwards each protocol method to the function it was built
//! from and adds nothing of its own. Whatever the function does, including
//! panicking, is what the caller observes.
pub mod comparison;
pub mod enumeration;
pub mod equality;
pub mod grouping;

pub use comparison::{AdHocComparable, AdHocComparer, Comparable, Compared, Comparer, Reversed};
pub use enumeration::{
  AdHocEnumerable, AdHocEnumerator, BoxedEnumerable, BoxedEnumerator, Enumerable,
  Enumeration, Enumerator, IterEnumerator,
};
pub use equality::{AdHocEqualityComparer, AdHocEquatable, EqualityComparer, Equatable, Keyed};
pub use grouping::{AdHocGrouping, AdHocLookup, BoxedGrouping, Grouping, Lookup};
