//! Default random source used by the free sampling functions.
//!
//! Every sampling routine is generic over an injected [`rand::Rng`]. When a
//! caller does not pass one, the crate falls back to a per-thread generator:
//!
//! - By default it is [`rand::rng()`], seeded from system entropy.
//! - [`seed_default_rng`] installs a deterministic [`StdRng`] for the calling
//!   thread, which makes the free functions reproducible (e.g. in tests).
//! - [`reset_default_rng`] goes back to entropy seeding.
//!
//! Keeping the generator thread-local means no locking and no contention
//! between threads. This is not a cryptographic source.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::RefCell;
use tracing::{debug, trace};

thread_local! {
    /// Seeded override for the current thread. `None` means entropy seeded.
    static DEFAULT_RNG: RefCell<Option<StdRng>> = const { RefCell::new(None) };
}

/// Installs a deterministic generator seeded with `seed` for the current thread.
pub fn seed_default_rng(seed: u64) {
    debug!(seed, "seeding default sampling rng");
    DEFAULT_RNG.with(|rng| {
        *rng.borrow_mut() = Some(StdRng::seed_from_u64(seed));
    })
}

/// Drops any seeded generator so the current thread uses entropy again.
pub fn reset_default_rng() {
    DEFAULT_RNG.with(|rng| {
        rng.borrow_mut().take();
    })
}

/// Runs `f` with the default generator of the current thread.
///
/// A call nested inside `f` (for example a free [`shuffle`](crate::sampler::shuffle)
/// run from the closure) cannot reach the seeded generator while the outer call
/// holds it, so it draws from [`rand::rng()`] instead.
pub fn with_default_rng<T>(f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
    DEFAULT_RNG.with(|rng| match rng.try_borrow_mut() {
        Ok(mut rng_ref) => match rng_ref.as_mut() {
            Some(rng) => f(rng),
            None => f(&mut rand::rng()),
        },
        Err(_) => {
            trace!("default rng in use, nested call falls back to entropy");
            f(&mut rand::rng())
        }
    })
}
