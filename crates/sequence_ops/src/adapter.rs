//! Adapters turning bare two-argument functions into named comparison
//! capabilities.
//!
//! [`Comparer`] implements [`Compare`] and [`EqualityComparer`] implements
//! [`Equivalence`]. Both only store the function value, so they are as cheap to
//! clone and share as the function itself.

use std::cmp::Ordering;
use std::fmt;

/// A total ordering over `T`.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// An equivalence relation over `T`.
pub trait Equivalence<T: ?Sized> {
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, C: Compare<T> + ?Sized> Compare<T> for &C {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (**self).compare(a, b)
    }
}

impl<T: ?Sized, E: Equivalence<T> + ?Sized> Equivalence<T> for &E {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (**self).equivalent(a, b)
    }
}

/// Wraps `Fn(&T, &T) -> Ordering` as a [`Compare`].
///
/// # Example
/// ```
/// use sequence_ops::adapter::{Compare, Comparer};
/// use std::cmp::Ordering;
///
/// let by_len = Comparer::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// assert_eq!(by_len.compare(&"ab", &"abc"), Ordering::Less);
/// assert_eq!(by_len.reversed().compare(&"ab", &"abc"), Ordering::Greater);
/// ```
#[derive(Clone, Copy)]
pub struct Comparer<F> {
    compare: F,
}

impl<F> Comparer<F> {
    /// Wraps `compare` as a [`Compare`].
    pub fn new(compare: F) -> Self {
        Self { compare }
    }

    /// The same ordering, reversed.
    pub fn reversed(self) -> Reversed<Self> {
        Reversed(self)
    }
}

impl<T: ?Sized, F> Compare<T> for Comparer<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }
}

impl<F> fmt::Debug for Comparer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparer").finish_non_exhaustive()
    }
}

/// Reverses the ordering of the wrapped [`Compare`].
#[derive(Debug, Clone, Copy)]
pub struct Reversed<C>(C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reversed<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(a, b).reverse()
    }
}

/// Wraps `Fn(&T, &T) -> bool` as an [`Equivalence`].
///
/// The function is trusted to be reflexive, symmetric and transitive.
#[derive(Clone, Copy)]
pub struct EqualityComparer<F> {
    equals: F,
}

impl<F> EqualityComparer<F> {
    /// Wraps `equals` as an [`Equivalence`].
    pub fn new(equals: F) -> Self {
        Self { equals }
    }
}

impl<T: ?Sized, F> Equivalence<T> for EqualityComparer<F>
where
    F: Fn(&T, &T) -> bool,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.equals)(a, b)
    }
}

impl<F> fmt::Debug for EqualityComparer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualityComparer").finish_non_exhaustive()
    }
}
