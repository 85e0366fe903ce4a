//! Short-circuiting element-count predicates.
//!
//! Each predicate pulls at most one element more than its bound, so they are
//! safe on infinite sources whenever the answer is decidable.

use crate::error::{Error, Result};

/// `true` when `source` has at least `n` elements. Pulls at most `n`.
pub fn contains_at_least<S: IntoIterator>(source: S, n: usize) -> bool {
    source.into_iter().take(n).count() == n
}

/// `true` when `source` has at most `n` elements. Pulls at most `n + 1`.
pub fn contains_at_most<S: IntoIterator>(source: S, n: usize) -> bool {
    let mut iter = source.into_iter();
    iter.by_ref().take(n).for_each(drop);
    iter.next().is_none()
}

/// `true` when `source` has exactly `n` elements. Pulls at most `n + 1`.
pub fn contains_exactly<S: IntoIterator>(source: S, n: usize) -> bool {
    let mut iter = source.into_iter();
    iter.by_ref().take(n).count() == n && iter.next().is_none()
}

/// `true` when the element count lies in `min..=max`. Pulls at most `max + 1`.
///
/// Fails with [`Error::InvalidArgument`] when `min > max`.
pub fn contains_between<S: IntoIterator>(source: S, min: usize, max: usize) -> Result<bool> {
    if min > max {
        return Err(Error::invalid(
            "min",
            format!("min ({min}) must not exceed max ({max})"),
        ));
    }
    let mut iter = source.into_iter();
    let taken = iter.by_ref().take(max).count();
    Ok(taken >= min && iter.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn at_least() {
        assert!(contains_at_least(1..=5, 5));
        assert!(contains_at_least(1..=5, 0));
        assert!(!contains_at_least(1..=5, 6));
        assert!(contains_at_least(0.., 1_000));
    }

    #[test]
    fn at_most() {
        assert!(contains_at_most(1..=5, 5));
        assert!(!contains_at_most(1..=5, 4));
        assert!(contains_at_most(std::iter::empty::<u8>(), 0));
        assert!(!contains_at_most(0.., 3));
    }

    #[test]
    fn exactly() {
        assert!(contains_exactly(vec!['a', 'b'], 2));
        assert!(!contains_exactly(vec!['a', 'b'], 1));
        assert!(!contains_exactly(vec!['a', 'b'], 3));
        assert!(!contains_exactly(0.., 10));
    }

    #[test]
    fn between() -> anyhow::Result<()> {
        assert!(contains_between(1..=5, 2, 5)?);
        assert!(!contains_between(1..=5, 6, 9)?);
        assert!(!contains_between(1..=5, 0, 4)?);
        assert!(contains_between(std::iter::empty::<u8>(), 0, 0)?);
        assert_eq!(contains_between(1..=5, 3, 2).unwrap_err().argument(), "min");
        Ok(())
    }

    #[test]
    fn at_most_pulls_one_past_the_bound() {
        let pulls = Cell::new(0);
        let source = (0..100).inspect(|_| pulls.set(pulls.get() + 1));
        assert!(!contains_at_most(source, 3));
        assert_eq!(pulls.get(), 4);
    }
}
