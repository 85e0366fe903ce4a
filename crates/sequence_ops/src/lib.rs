//! Composable operations over ordered, possibly unbounded, single-pass
//! sequences: lazy batching, uniform shuffling, and random sampling without
//! replacement, plus function-driven ordering and de-duplication helpers.
//!
//! Every operation is available as a free function and as a
//! [`SequenceExt`] method on any iterator.

pub mod adapter;
pub mod batch;
pub mod config;
pub mod error;
pub mod ext;
pub mod join;
pub mod ordering;
pub mod quantify;
pub mod rng;
pub mod sampler;

pub use adapter::{Compare, Comparer, EqualityComparer, Equivalence};
pub use batch::{batch, Batch, Batches};
pub use config::SamplerConfig;
pub use error::{Error, Result};
pub use ext::SequenceExt;
pub use ordering::{distinct_by, distinct_by_key, order_by, order_by_descending};
pub use sampler::{random_one, sample, sample_with_replacement, shuffle, Sampler};
