//! Method syntax for every operation in the crate.
//!
//! ```
//! use sequence_ops::SequenceExt;
//!
//! let lengths: Vec<usize> = (1..=25).batch(10)?.map(|b| b.count()).collect();
//! assert_eq!(lengths, vec![10, 10, 5]);
//! assert!((1..=25).contains_at_least(20));
//! # Ok::<(), sequence_ops::Error>(())
//! ```

use crate::adapter::{EqualityComparer, Equivalence};
use crate::batch::{self, Batches};
use crate::error::Result;
use crate::join;
use crate::ordering::{self, DistinctBy, DistinctByKey};
use crate::quantify;
use crate::sampler::{self, Sampler};
use rand::Rng;
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::Hash;

/// Extension methods available on every [`Iterator`].
///
/// Methods ending in `_with` take an explicit generator; the others use the
/// default per-thread generator described in [`crate::rng`].
pub trait SequenceExt: Iterator + Sized {
    /// See [`batch::batch`].
    fn batch(self, batch_size: usize) -> Result<Batches<Self>> {
        batch::batch(self, batch_size)
    }

    /// See [`sampler::shuffle`].
    fn shuffle(self) -> Vec<Self::Item> {
        sampler::shuffle(self)
    }

    /// [`SequenceExt::shuffle`] with an explicit generator.
    fn shuffle_with<R: Rng>(self, rng: &mut R) -> Vec<Self::Item> {
        Sampler::new(rng).shuffle(self)
    }

    /// See [`sampler::sample`].
    fn sample(self, count: usize) -> Result<Vec<Self::Item>> {
        sampler::sample(self, count)
    }

    /// [`SequenceExt::sample`] with an explicit generator.
    fn sample_with<R: Rng>(self, count: usize, rng: &mut R) -> Result<Vec<Self::Item>> {
        Sampler::new(rng).sample(self, count)
    }

    /// See [`sampler::sample_with_replacement`].
    fn sample_with_replacement(self, count: usize) -> Result<Vec<Self::Item>>
    where
        Self::Item: Clone,
    {
        sampler::sample_with_replacement(self, count)
    }

    /// See [`sampler::random_one`].
    fn random_one(self) -> Option<Self::Item> {
        sampler::random_one(self)
    }

    /// [`SequenceExt::random_one`] with an explicit generator.
    fn random_one_with<R: Rng>(self, rng: &mut R) -> Option<Self::Item> {
        Sampler::new(rng).random_one(self)
    }

    /// See [`ordering::order_by`].
    fn order_by<F>(self, compare: F) -> Vec<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        ordering::order_by(self, compare)
    }

    /// See [`ordering::order_by_descending`].
    fn order_by_descending<F>(self, compare: F) -> Vec<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        ordering::order_by_descending(self, compare)
    }

    /// See [`ordering::distinct_by`].
    fn distinct_by<F>(self, equals: F) -> DistinctBy<Self, EqualityComparer<F>>
    where
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        ordering::distinct_by(self, equals)
    }

    /// See [`ordering::distinct_with`].
    fn distinct_with<E>(self, equivalence: E) -> DistinctBy<Self, E>
    where
        E: Equivalence<Self::Item>,
    {
        ordering::distinct_with(self, equivalence)
    }

    /// See [`ordering::distinct_by_key`].
    fn distinct_by_key<F, K>(self, key: F) -> DistinctByKey<Self, F, K>
    where
        F: FnMut(&Self::Item) -> K,
        K: Hash + Eq,
    {
        ordering::distinct_by_key(self, key)
    }

    /// See [`quantify::contains_at_least`].
    fn contains_at_least(self, n: usize) -> bool {
        quantify::contains_at_least(self, n)
    }

    /// See [`quantify::contains_at_most`].
    fn contains_at_most(self, n: usize) -> bool {
        quantify::contains_at_most(self, n)
    }

    /// See [`quantify::contains_exactly`].
    fn contains_exactly(self, n: usize) -> bool {
        quantify::contains_exactly(self, n)
    }

    /// See [`quantify::contains_between`].
    fn contains_between(self, min: usize, max: usize) -> Result<bool> {
        quantify::contains_between(self, min, max)
    }

    /// See [`join::join_delimited`].
    fn join_delimited(self, separator: &str) -> String
    where
        Self::Item: Display,
    {
        join::join_delimited(self, separator)
    }
}

impl<I: Iterator> SequenceExt for I {}
