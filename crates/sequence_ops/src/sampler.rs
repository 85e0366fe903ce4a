use crate::config::SamplerConfig;
use crate::error::{Error, Result};
use crate::rng::with_default_rng;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

/// A `Sampler` draws shuffles and random subsets from finite sequences using
/// one owned random number generator.
///
/// Every operation materializes the source into a private item pool first
/// (shuffling and subset selection both need the whole population), so the
/// source is enumerated exactly once and never mutated.
///
/// # Seed Handling
/// - [`Sampler::seeded`] / a config with `seed = Some(..)`: identical results
///   for identical inputs and call order.
/// - [`Sampler::from_entropy`] / `seed = None`: seeded from system entropy.
/// - [`Sampler::new`] injects any [`Rng`], including `&mut` borrows of one.
///
/// The generator is reused across calls, so consecutive calls on the same
/// sampler are statistically independent. It is not a cryptographic source.
///
/// # Example usage
/// ```
/// use sequence_ops::sampler::Sampler;
///
/// let mut sampler = Sampler::seeded(42);
/// let deck = sampler.shuffle(1..=52);
/// let hand = sampler.sample(deck, 5)?;
/// assert_eq!(hand.len(), 5);
/// # Ok::<(), sequence_ops::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Sampler<R = StdRng> {
    rng: R,
}

impl Sampler<StdRng> {
    /// Builds a sampler from a [`SamplerConfig`].
    pub fn from_config(config: &SamplerConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Deterministic sampler seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "creating seeded sampler");
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Sampler seeded from system entropy.
    pub fn from_entropy() -> Self {
        debug!("creating entropy-seeded sampler");
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> Sampler<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Mutable access to the underlying generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Consumes the sampler and returns its generator.
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Returns the elements of `source` in uniformly random order.
    ///
    /// Fisher-Yates over a private pool: exactly `n - 1` draws, none for 0 or 1
    /// elements.
    pub fn shuffle<S: IntoIterator>(&mut self, source: S) -> Vec<S::Item> {
        self.shuffle_pool(source.into_iter().collect())
    }

    /// Draws `count` elements of `source` without replacement.
    ///
    /// The result order is determined by the draws, not by source order.
    /// Fails with [`Error::InvalidArgument`] when `count` exceeds the number of
    /// elements, after materializing the source and before any draw.
    pub fn sample<S: IntoIterator>(&mut self, source: S, count: usize) -> Result<Vec<S::Item>> {
        self.sample_pool(source.into_iter().collect(), count)
    }

    /// Draws `count` independent elements of `source`; positions may repeat.
    ///
    /// Fails with [`Error::InvalidArgument`] when `count > 0` and the source is empty.
    pub fn sample_with_replacement<S>(&mut self, source: S, count: usize) -> Result<Vec<S::Item>>
    where
        S: IntoIterator,
        S::Item: Clone,
    {
        self.sample_pool_with_replacement(source.into_iter().collect(), count)
    }

    /// Picks one element of `source`, or `None` when it is empty.
    pub fn random_one<S: IntoIterator>(&mut self, source: S) -> Option<S::Item> {
        self.random_one_pool(source.into_iter().collect())
    }

    /// [`Sampler::shuffle`] over a source of `Result` items.
    ///
    /// The first source error aborts materialization and is returned unchanged
    /// inside the [`anyhow::Error`].
    pub fn try_shuffle<S, T, E>(&mut self, source: S) -> anyhow::Result<Vec<T>>
    where
        S: IntoIterator<Item = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        Ok(self.shuffle_pool(materialize(source)?))
    }

    /// [`Sampler::sample`] over a source of `Result` items.
    pub fn try_sample<S, T, E>(&mut self, source: S, count: usize) -> anyhow::Result<Vec<T>>
    where
        S: IntoIterator<Item = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        Ok(self.sample_pool(materialize(source)?, count)?)
    }

    /// [`Sampler::random_one`] over a source of `Result` items.
    pub fn try_random_one<S, T, E>(&mut self, source: S) -> anyhow::Result<Option<T>>
    where
        S: IntoIterator<Item = std::result::Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        Ok(self.random_one_pool(materialize(source)?))
    }

    pub(crate) fn shuffle_pool<T>(&mut self, mut pool: Vec<T>) -> Vec<T> {
        for i in (1..pool.len()).rev() {
            let j = self.rng.random_range(0..=i);
            pool.swap(i, j);
        }
        pool
    }

    pub(crate) fn sample_pool<T>(&mut self, mut pool: Vec<T>, count: usize) -> Result<Vec<T>> {
        if count > pool.len() {
            return Err(Error::invalid(
                "count",
                format!(
                    "count ({count}) exceeds available elements ({})",
                    pool.len()
                ),
            ));
        }
        trace!(count, population = pool.len(), "sampling without replacement");

        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            if pool.is_empty() {
                break;
            }
            // Order of the remaining pool is irrelevant, so O(1) removal keeps
            // every draw uniform.
            let index = self.rng.random_range(0..pool.len());
            picked.push(pool.swap_remove(index));
        }
        Ok(picked)
    }

    pub(crate) fn sample_pool_with_replacement<T: Clone>(
        &mut self,
        pool: Vec<T>,
        count: usize,
    ) -> Result<Vec<T>> {
        if count > 0 && pool.is_empty() {
            return Err(Error::invalid(
                "count",
                format!("cannot draw {count} elements from an empty sequence"),
            ));
        }
        trace!(count, population = pool.len(), "sampling with replacement");
        Ok((0..count)
            .map(|_| pool[self.rng.random_range(0..pool.len())].clone())
            .collect())
    }

    pub(crate) fn random_one_pool<T>(&mut self, pool: Vec<T>) -> Option<T> {
        if pool.is_empty() {
            return None;
        }
        self.sample_pool(pool, 1).ok()?.pop()
    }
}

fn materialize<S, T, E>(source: S) -> anyhow::Result<Vec<T>>
where
    S: IntoIterator<Item = std::result::Result<T, E>>,
    E: Into<anyhow::Error>,
{
    source
        .into_iter()
        .collect::<std::result::Result<Vec<T>, E>>()
        .map_err(Into::into)
}

// ============================================================================
// Free functions over the default per-thread generator (see `crate::rng`).
// The source is always materialized before the generator is borrowed.

/// Returns the elements of `source` in uniformly random order.
pub fn shuffle<S: IntoIterator>(source: S) -> Vec<S::Item> {
    let pool: Vec<_> = source.into_iter().collect();
    with_default_rng(|rng| Sampler::new(rng).shuffle_pool(pool))
}

/// Draws `count` elements of `source` without replacement.
pub fn sample<S: IntoIterator>(source: S, count: usize) -> Result<Vec<S::Item>> {
    let pool: Vec<_> = source.into_iter().collect();
    with_default_rng(|rng| Sampler::new(rng).sample_pool(pool, count))
}

/// Draws `count` independent elements of `source`, with replacement.
pub fn sample_with_replacement<S>(source: S, count: usize) -> Result<Vec<S::Item>>
where
    S: IntoIterator,
    S::Item: Clone,
{
    let pool: Vec<_> = source.into_iter().collect();
    with_default_rng(|rng| Sampler::new(rng).sample_pool_with_replacement(pool, count))
}

/// Picks one element of `source`, or `None` when it is empty. Never fails.
pub fn random_one<S: IntoIterator>(source: S) -> Option<S::Item> {
    let pool: Vec<_> = source.into_iter().collect();
    with_default_rng(|rng| Sampler::new(rng).random_one_pool(pool))
}

/// [`shuffle`] over a source of `Result` items.
pub fn try_shuffle<S, T, E>(source: S) -> anyhow::Result<Vec<T>>
where
    S: IntoIterator<Item = std::result::Result<T, E>>,
    E: Into<anyhow::Error>,
{
    let pool = materialize(source)?;
    Ok(with_default_rng(|rng| {
        Sampler::new(rng).shuffle_pool(pool)
    }))
}

/// [`sample`] over a source of `Result` items.
pub fn try_sample<S, T, E>(source: S, count: usize) -> anyhow::Result<Vec<T>>
where
    S: IntoIterator<Item = std::result::Result<T, E>>,
    E: Into<anyhow::Error>,
{
    let pool = materialize(source)?;
    Ok(with_default_rng(|rng| {
        Sampler::new(rng).sample_pool(pool, count)
    })?)
}

/// [`random_one`] over a source of `Result` items.
pub fn try_random_one<S, T, E>(source: S) -> anyhow::Result<Option<T>>
where
    S: IntoIterator<Item = std::result::Result<T, E>>,
    E: Into<anyhow::Error>,
{
    let pool = materialize(source)?;
    Ok(with_default_rng(|rng| {
        Sampler::new(rng).random_one_pool(pool)
    }))
}

// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;
    use std::collections::HashSet;

    const TEST_SEED: u64 = 42;

    /// Generator wrapper that counts how often it is asked for randomness.
    struct CountingRng {
        inner: StdRng,
        calls: usize,
    }

    impl CountingRng {
        fn new() -> Self {
            Self {
                inner: StdRng::seed_from_u64(TEST_SEED),
                calls: 0,
            }
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.calls += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.calls += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.calls += 1;
            self.inner.fill_bytes(dst)
        }
    }

    fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
        items.sort();
        items
    }

    mod shuffle_tests {
        use super::*;

        #[test]
        fn returns_a_permutation() {
            let mut sampler = Sampler::seeded(TEST_SEED);
            let shuffled = sampler.shuffle(vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3]);
            assert_eq!(sorted(shuffled), vec![1, 1, 2, 3, 3, 4, 5, 5, 6, 9]);
        }

        #[test]
        fn trivial_inputs_need_no_draws() {
            let mut sampler = Sampler::new(CountingRng::new());
            assert!(sampler.shuffle(Vec::<u8>::new()).is_empty());
            assert_eq!(sampler.shuffle(["only"]), vec!["only"]);
            assert_eq!(sampler.into_inner().calls, 0);
        }

        #[test]
        fn matches_hand_run_fisher_yates() {
            let mut reference = StdRng::seed_from_u64(TEST_SEED);
            let mut expected: Vec<u32> = (0..50).collect();
            for i in (1..expected.len()).rev() {
                let j = reference.random_range(0..=i);
                expected.swap(i, j);
            }

            let mut sampler = Sampler::seeded(TEST_SEED);
            assert_eq!(sampler.shuffle(0..50u32), expected);
            // Exactly n - 1 draws: both generators are left in the same state.
            assert_eq!(sampler.rng_mut().next_u64(), reference.next_u64());
        }

        #[test]
        fn two_elements_take_one_draw() {
            let mut sampler = Sampler::new(CountingRng::new());
            sampler.shuffle([1, 2]);
            let mut reference = StdRng::seed_from_u64(TEST_SEED);
            let _ = reference.random_range(0..=1usize);
            assert_eq!(sampler.into_inner().inner.next_u64(), reference.next_u64());
        }

        #[test]
        fn same_seed_gives_same_order() {
            let first = Sampler::seeded(TEST_SEED).shuffle(0..100);
            let second = Sampler::seeded(TEST_SEED).shuffle(0..100);
            assert_eq!(first, second);
        }

        #[test]
        fn reused_sampler_gives_fresh_orders() {
            let mut sampler = Sampler::seeded(TEST_SEED);
            let first = sampler.shuffle(0..100);
            let second = sampler.shuffle(0..100);
            assert_ne!(first, second);
        }

        #[test]
        fn every_permutation_of_three_appears() {
            let mut sampler = Sampler::seeded(TEST_SEED);
            let seen: HashSet<Vec<u8>> = (0..600).map(|_| sampler.shuffle([1, 2, 3])).collect();
            assert_eq!(seen.len(), 6);
        }
    }

    mod sample_tests {
        use super::*;

        #[test]
        fn rejects_count_above_population() {
            let mut sampler = Sampler::new(CountingRng::new());
            let err = sampler.sample(1..=3, 4).unwrap_err();
            assert_eq!(err.argument(), "count");
            assert!(err.to_string().contains("count (4) exceeds available elements (3)"));
            assert_eq!(sampler.into_inner().calls, 0);
        }

        #[test]
        fn zero_count_is_empty_without_draws() -> anyhow::Result<()> {
            let mut sampler = Sampler::new(CountingRng::new());
            assert!(sampler.sample(1..=10, 0)?.is_empty());
            assert!(sampler.sample(std::iter::empty::<u8>(), 0)?.is_empty());
            assert_eq!(sampler.into_inner().calls, 0);
            Ok(())
        }

        #[test]
        fn full_count_is_a_permutation() -> anyhow::Result<()> {
            let mut sampler = Sampler::seeded(TEST_SEED);
            let picked = sampler.sample(vec!['a', 'b', 'b', 'c'], 4)?;
            assert_eq!(sorted(picked), vec!['a', 'b', 'b', 'c']);
            Ok(())
        }

        #[test]
        fn picks_distinct_positions() -> anyhow::Result<()> {
            let mut sampler = Sampler::seeded(TEST_SEED);
            let picked = sampler.sample(0..1000, 100)?;
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 100);
            assert!(picked.iter().all(|&x| x < 1000));
            Ok(())
        }

        #[test]
        fn one_draw_per_picked_element() -> anyhow::Result<()> {
            let mut reference = StdRng::seed_from_u64(TEST_SEED);
            let mut pool: Vec<u32> = (0..50).collect();
            let expected: Vec<u32> = (0..7)
                .map(|_| {
                    let index = reference.random_range(0..pool.len());
                    pool.swap_remove(index)
                })
                .collect();

            let mut sampler = Sampler::seeded(TEST_SEED);
            assert_eq!(sampler.sample(0..50u32, 7)?, expected);
            // Exactly 7 draws: both generators are left in the same state.
            assert_eq!(sampler.rng_mut().next_u64(), reference.next_u64());
            Ok(())
        }

        #[test]
        fn with_replacement_may_repeat() -> anyhow::Result<()> {
            let mut sampler = Sampler::seeded(TEST_SEED);
            let picked = sampler.sample_with_replacement([1, 2], 50)?;
            assert_eq!(picked.len(), 50);
            assert!(picked.contains(&1) && picked.contains(&2));
            Ok(())
        }

        #[test]
        fn with_replacement_rejects_empty_population() {
            let mut sampler = Sampler::seeded(TEST_SEED);
            assert!(sampler.sample_with_replacement(Vec::<u8>::new(), 1).is_err());
            assert_eq!(
                sampler.sample_with_replacement(Vec::<u8>::new(), 0),
                Ok(Vec::new())
            );
        }

        #[test]
        fn random_one_on_empty_is_none() {
            let mut sampler = Sampler::new(CountingRng::new());
            assert_eq!(sampler.random_one(Vec::<i32>::new()), None);
            assert_eq!(sampler.into_inner().calls, 0);
        }

        #[test]
        fn random_one_picks_member() {
            let mut sampler = Sampler::seeded(TEST_SEED);
            let picked = sampler.random_one(10..20).unwrap();
            assert!((10..20).contains(&picked));
        }
    }

    mod fallible_source_tests {
        use super::*;

        #[derive(Debug, thiserror::Error, PartialEq)]
        #[error("read failed at {0}")]
        struct ReadError(usize);

        #[test]
        fn try_shuffle_returns_first_source_error() {
            let source = vec![Ok(1), Err(ReadError(1)), Err(ReadError(2))];
            let err = Sampler::seeded(TEST_SEED).try_shuffle(source).unwrap_err();
            assert_eq!(err.downcast_ref::<ReadError>(), Some(&ReadError(1)));
        }

        #[test]
        fn try_sample_checks_count_after_materializing() {
            let source: Vec<Result<u8, ReadError>> = vec![Ok(1), Ok(2)];
            let err = Sampler::seeded(TEST_SEED).try_sample(source, 3).unwrap_err();
            assert!(err.downcast_ref::<Error>().is_some());
        }

        #[test]
        fn try_random_one_accepts_anyhow_items() -> anyhow::Result<()> {
            let source: Vec<anyhow::Result<&str>> = vec![Ok("x")];
            assert_eq!(Sampler::seeded(TEST_SEED).try_random_one(source)?, Some("x"));
            Ok(())
        }
    }

    mod default_rng_tests {
        use super::*;
        use crate::rng::{reset_default_rng, seed_default_rng};

        #[test]
        fn free_functions_follow_seeded_default_rng() -> anyhow::Result<()> {
            seed_default_rng(TEST_SEED);
            let first = (shuffle(0..20), sample(0..20, 5)?, random_one(0..20));
            seed_default_rng(TEST_SEED);
            let second = (shuffle(0..20), sample(0..20, 5)?, random_one(0..20));
            reset_default_rng();
            assert_eq!(first, second);
            Ok(())
        }

        #[test]
        fn free_functions_match_seeded_sampler() -> anyhow::Result<()> {
            seed_default_rng(TEST_SEED);
            let free = shuffle(0..30);
            reset_default_rng();
            assert_eq!(free, Sampler::seeded(TEST_SEED).shuffle(0..30));
            Ok(())
        }

        #[test]
        fn free_functions_validate_count() {
            assert!(sample(0..3, 4).is_err());
            assert!(sample_with_replacement(std::iter::empty::<u8>(), 2).is_err());
            assert_eq!(random_one(std::iter::empty::<u8>()), None);
            assert!(try_sample(vec![Ok::<u8, anyhow::Error>(1)], 2).is_err());
            assert_eq!(try_shuffle(vec![Ok::<u8, anyhow::Error>(1)]).ok(), Some(vec![1]));
            assert_eq!(try_random_one(Vec::<anyhow::Result<u8>>::new()).ok(), Some(None));
        }
    }
}
