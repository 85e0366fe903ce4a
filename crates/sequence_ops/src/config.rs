//! src/config.rs
//!
//! Configuration for [`Sampler`](crate::sampler::Sampler) construction.
//!
//! Example:
//! ```
//! use sequence_ops::config::SamplerConfig;
//! use sequence_ops::sampler::Sampler;
//!
//! let config = SamplerConfig::builder().seed(42).build();
//! let mut sampler = Sampler::from_config(&config);
//! let picked = sampler.sample(0..100, 3)?;
//! assert_eq!(picked.len(), 3);
//! # Ok::<(), sequence_ops::Error>(())
//! ```

/// Configuration for a [`Sampler`](crate::sampler::Sampler).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Seed for the sampler's generator. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl SamplerConfig {
    /// Starts a builder with no seed set.
    pub fn builder() -> SamplerConfigBuilder {
        SamplerConfigBuilder::default()
    }
}

/// Builder for SamplerConfig with method chaining
#[derive(Debug, Default)]
pub struct SamplerConfigBuilder {
    config: SamplerConfig,
}

impl SamplerConfigBuilder {
    /// Set the random seed for reproducible shuffling and sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Clear any seed so the sampler is seeded from system entropy.
    pub fn entropy(mut self) -> Self {
        self.config.seed = None;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> SamplerConfig {
        self.config
    }
}
