//! Error types for the simulation engine.

use plaguesim_types::ConfigError;
use thiserror::Error;

/// Errors raised while evaluating hazards or stepping a trial.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Invalid configuration reached the engine.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The exponential sampler was given a rate it cannot draw from.
    #[error("cannot sample an exponential waiting time with rate {rate}")]
    Sampling { rate: f64 },
}
