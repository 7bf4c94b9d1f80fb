//! Error types for the Monte Carlo driver.

use plaguesim_simulation::SimulationError;
use plaguesim_types::ConfigError;
use thiserror::Error;

/// Errors raised while configuring or running a sweep.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A trial failed.
    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// A statistic was requested from too few outcomes.
    #[error("{statistic} is undefined for {samples} sample(s), need at least {required}")]
    StatisticalUndefined {
        statistic: &'static str,
        samples: usize,
        required: usize,
    },

    /// Reading input or writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a JSON report failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
