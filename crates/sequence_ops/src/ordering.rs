//! Sorting and de-duplication driven by caller-supplied functions.
//!
//! `order_by` and friends delegate to the standard library's stable sort after
//! bridging the function through [`Comparer`]. `distinct_by` bridges through
//! [`EqualityComparer`] and is lazy: the first element of every equivalence
//! class is yielded as soon as it is pulled.

use crate::adapter::{Compare, Comparer, EqualityComparer, Equivalence};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use std::iter::FusedIterator;

/// Collects `source` and stable-sorts it with `compare`.
pub fn order_by<S, F>(source: S, compare: F) -> Vec<S::Item>
where
    S: IntoIterator,
    F: Fn(&S::Item, &S::Item) -> Ordering,
{
    order_with(source, Comparer::new(compare))
}

/// Like [`order_by`] with the ordering reversed. Ties keep source order.
pub fn order_by_descending<S, F>(source: S, compare: F) -> Vec<S::Item>
where
    S: IntoIterator,
    F: Fn(&S::Item, &S::Item) -> Ordering,
{
    order_with(source, Comparer::new(compare).reversed())
}

/// Collects `source` and stable-sorts it with any [`Compare`] implementation.
pub fn order_with<S, C>(source: S, comparer: C) -> Vec<S::Item>
where
    S: IntoIterator,
    C: Compare<S::Item>,
{
    let mut items: Vec<_> = source.into_iter().collect();
    items.sort_by(|a, b| comparer.compare(a, b));
    items
}

/// Lazily drops elements equivalent (per `equals`) to an earlier one.
///
/// Retains a clone of every distinct element seen so far, and compares each
/// new element against all of them.
pub fn distinct_by<S, F>(source: S, equals: F) -> DistinctBy<S::IntoIter, EqualityComparer<F>>
where
    S: IntoIterator,
    F: Fn(&S::Item, &S::Item) -> bool,
{
    distinct_with(source, EqualityComparer::new(equals))
}

/// Like [`distinct_by`] with any [`Equivalence`] implementation.
pub fn distinct_with<S, E>(source: S, equivalence: E) -> DistinctBy<S::IntoIter, E>
where
    S: IntoIterator,
    E: Equivalence<S::Item>,
{
    DistinctBy {
        source: source.into_iter(),
        equivalence,
        seen: Vec::new(),
    }
}

/// Lazily drops elements whose key was already produced by an earlier element.
pub fn distinct_by_key<S, F, K>(source: S, key: F) -> DistinctByKey<S::IntoIter, F, K>
where
    S: IntoIterator,
    F: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    DistinctByKey {
        source: source.into_iter(),
        key,
        seen: HashSet::new(),
    }
}

/// Iterator returned by [`distinct_by`] and [`distinct_with`].
#[derive(Debug, Clone)]
pub struct DistinctBy<I: Iterator, E> {
    source: I,
    equivalence: E,
    seen: Vec<I::Item>,
}

impl<I, E> Iterator for DistinctBy<I, E>
where
    I: Iterator,
    I::Item: Clone,
    E: Equivalence<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.source.next()?;
            let repeated = self
                .seen
                .iter()
                .any(|kept| self.equivalence.equivalent(kept, &item));
            if !repeated {
                self.seen.push(item.clone());
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.source.size_hint().1)
    }
}

impl<I, E> FusedIterator for DistinctBy<I, E>
where
    I: FusedIterator,
    I::Item: Clone,
    E: Equivalence<I::Item>,
{
}

/// Iterator returned by [`distinct_by_key`].
#[derive(Debug, Clone)]
pub struct DistinctByKey<I, F, K> {
    source: I,
    key: F,
    seen: HashSet<K>,
}

impl<I, F, K> Iterator for DistinctByKey<I, F, K>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    K: Hash + Eq,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.source.next()?;
            if self.seen.insert((self.key)(&item)) {
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.source.size_hint().1)
    }
}
