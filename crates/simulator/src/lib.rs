//! PlagueSim Monte Carlo driver.
//!
//! Estimates the steady-state probability that an individual is infected
//! by repeating stochastic SIS trials per population size until a
//! confidence-interval stopping rule is met, then sweeping the population
//! range.
//!
//! # Architecture
//!
//! The driver builds on `plaguesim-simulation` to provide:
//!
//! - **Configuration**: contagion rates, topology, population sweep, seed
//! - **Stopping Rules**: sequential (minimum trials + relative half-width) or fixed
//! - **Sweep**: sequential with a streaming sink, or parallel across populations
//! - **Reports**: text layouts and JSON
//!
//! # Example
//!
//! ```ignore
//! use plaguesim_simulation::ContagionParams;
//! use plaguesim_simulator::{MonteCarloDriver, ReportLayout, SimulatorConfig};
//! use plaguesim_types::TopologyKind;
//!
//! let config = SimulatorConfig::new(ContagionParams::new(1.1, 10.0, 1.0))
//!     .with_topology(TopologyKind::Ring)
//!     .with_populations(5, 30, 5)
//!     .with_seed(42);
//!
//! let driver = MonteCarloDriver::new(config)?;
//! let report = driver.run()?;
//! report.write_to(std::io::stdout(), ReportLayout::Fraction)?;
//! ```

pub mod config;
pub mod driver;
mod error;
pub mod report;
pub mod stats;

pub use config::{load_adjacency, MainParameter, PopulationRange, SimulatorConfig};
pub use driver::{MonteCarloDriver, PopulationSummary};
pub use error::SimulatorError;
pub use report::{ReportLayout, SweepReport};
pub use stats::{OutcomeStats, StoppingRule, HALF_WIDTH_SCALE, MIN_TRIALS, Z_95};
