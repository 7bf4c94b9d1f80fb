//! Configuration error types.

use thiserror::Error;

/// Errors caused by invalid configuration input.
///
/// These are precondition violations: they are detected before a sweep (or
/// before a single population size) runs, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A population of zero individuals was requested.
    #[error("population must contain at least one individual")]
    EmptyPopulation,

    /// Fewer adjacency entries were supplied than the population requires.
    #[error("adjacency matrix has {found} entries, expected at least {expected}")]
    UndersizedMatrix { expected: usize, found: usize },

    /// An adjacency entry was not a non-negative integer.
    #[error("malformed adjacency entry {token:?} at position {position}")]
    MalformedMatrix { position: usize, token: String },

    /// The custom topology was selected without an adjacency matrix.
    #[error("custom topology requires an adjacency matrix")]
    MissingMatrix,

    /// The population sweep bounds are inconsistent.
    #[error("invalid population range: min {min}, max {max}, increment {increment}")]
    InvalidPopulationRange {
        min: usize,
        max: usize,
        increment: usize,
    },

    /// A numeric parameter is outside its allowed domain.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
