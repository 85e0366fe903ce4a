//! Error type shared by every operation in the crate.
//!
//! Only argument validation produces an [`Error`]. Faults raised by a source
//! sequence are never wrapped by the infallible operations: a source of
//! `Result<T, E>` items simply yields its `Err` values in position. The
//! `try_*` sampler variants surface them through [`anyhow::Result`].

use thiserror::Error;

/// Errors raised synchronously, before any side effect on the source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// An argument is outside the range the operation accepts.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        name: &'static str,
        /// Human readable description of the violated constraint
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the name of the parameter that failed validation.
    pub fn argument(&self) -> &'static str {
        match self {
            Self::InvalidArgument { name, .. } => name,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn formats_name_and_reason() {
        let err = Error::invalid("batch_size", "batch_size must be >= 1, but got batch_size=0");
        assert_eq!(err.argument(), "batch_size");
        assert_eq!(
            err.to_string(),
            "Invalid argument `batch_size`: batch_size must be >= 1, but got batch_size=0"
        );
    }

    #[test]
    fn converts_into_anyhow() {
        let err: anyhow::Error = Error::invalid("count", "too large").into();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidArgument { name: "count", .. })
        ));
    }
}
