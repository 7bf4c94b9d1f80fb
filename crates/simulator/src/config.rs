//! Configuration types for the simulator.

use crate::{SimulatorError, StoppingRule};
use plaguesim_simulation::{ContagionParams, HazardMode, DEFAULT_HORIZON_FACTOR};
use plaguesim_types::{AdjacencyMatrix, ConfigError, TopologyKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Inclusive range of population sizes to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRange {
    pub min: usize,
    pub max: usize,
    pub increment: usize,
}

impl PopulationRange {
    pub fn new(min: usize, max: usize, increment: usize) -> Self {
        Self {
            min,
            max,
            increment,
        }
    }

    /// Population sizes from `min` to `max` inclusive, stepping by `increment`.
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.min..=self.max).step_by(self.increment.max(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min == 0 || self.increment == 0 || self.min > self.max {
            return Err(ConfigError::InvalidPopulationRange {
                min: self.min,
                max: self.max,
                increment: self.increment,
            });
        }
        Ok(())
    }
}

impl Default for PopulationRange {
    fn default() -> Self {
        Self::new(5, 60, 5)
    }
}

/// The rate a sweep is studied against; labels the report header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainParameter {
    /// Endogenous multiplier.
    #[default]
    Gamma,
    /// Cure rate.
    Mu,
    /// Total exogenous budget.
    C,
}

impl MainParameter {
    /// Current value of this parameter.
    pub fn value(self, params: &ContagionParams) -> f64 {
        match self {
            MainParameter::Gamma => params.gamma,
            MainParameter::Mu => params.cure_rate,
            MainParameter::C => params.exogenous_budget,
        }
    }
}

impl fmt::Display for MainParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainParameter::Gamma => f.write_str("Gamma"),
            MainParameter::Mu => f.write_str("Mu"),
            MainParameter::C => f.write_str("C"),
        }
    }
}

/// Configuration for a simulation sweep.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Contagion rates and hazard combination law.
    pub contagion: ContagionParams,

    /// Population sizes to sweep. Ignored for the custom topology, whose
    /// population is the size of its adjacency matrix.
    pub populations: PopulationRange,

    /// Contact graph shape.
    pub topology: TopologyKind,

    /// Adjacency matrix for the custom topology.
    pub matrix: Option<AdjacencyMatrix>,

    /// When to stop sampling each population size.
    pub stopping: StoppingRule,

    /// Simulated time per individual before a trial is censored.
    pub horizon_factor: f64,

    /// Random seed for deterministic simulation.
    pub seed: u64,

    /// Parameter named in the report header.
    pub main_parameter: MainParameter,
}

impl SimulatorConfig {
    /// Create a configuration with the given contagion parameters.
    pub fn new(contagion: ContagionParams) -> Self {
        Self {
            contagion,
            populations: PopulationRange::default(),
            topology: TopologyKind::default(),
            matrix: None,
            stopping: StoppingRule::default(),
            horizon_factor: DEFAULT_HORIZON_FACTOR,
            seed: 12345,
            main_parameter: MainParameter::default(),
        }
    }

    /// Set the population sweep.
    pub fn with_populations(mut self, min: usize, max: usize, increment: usize) -> Self {
        self.populations = PopulationRange::new(min, max, increment);
        self
    }

    /// Use a generated topology.
    pub fn with_topology(mut self, topology: TopologyKind) -> Self {
        self.topology = topology;
        self
    }

    /// Use the custom topology with the given adjacency matrix.
    pub fn with_matrix(mut self, matrix: AdjacencyMatrix) -> Self {
        self.topology = TopologyKind::Custom;
        self.matrix = Some(matrix);
        self
    }

    /// Set the hazard combination law.
    pub fn with_hazard_mode(mut self, mode: HazardMode) -> Self {
        self.contagion.hazard_mode = mode;
        self
    }

    /// Set the stopping rule.
    pub fn with_stopping(mut self, stopping: StoppingRule) -> Self {
        self.stopping = stopping;
        self
    }

    /// Use the sequential stopping rule with the given relative threshold.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.stopping = StoppingRule::sequential(confidence);
        self
    }

    /// Set the horizon factor.
    pub fn with_horizon_factor(mut self, factor: f64) -> Self {
        self.horizon_factor = factor;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the parameter named in the report header.
    pub fn with_main_parameter(mut self, parameter: MainParameter) -> Self {
        self.main_parameter = parameter;
        self
    }

    /// Population sizes this configuration runs, in order.
    pub fn population_sizes(&self) -> Vec<usize> {
        match (&self.matrix, self.topology) {
            (Some(matrix), TopologyKind::Custom) => vec![matrix.size()],
            _ => self.populations.sizes().collect(),
        }
    }

    /// Validate everything once, before any trial runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.contagion.validate()?;

        if !self.horizon_factor.is_finite() || self.horizon_factor <= 0.0 {
            return Err(ConfigError::invalid(
                "horizon_factor",
                format!("must be finite and positive, got {}", self.horizon_factor),
            ));
        }

        match self.stopping {
            StoppingRule::Sequential {
                min_trials,
                confidence,
                max_trials,
            } => {
                if !(confidence > 0.0 && confidence < 1.0) {
                    return Err(ConfigError::invalid(
                        "confidence",
                        format!("must lie in (0, 1), got {confidence}"),
                    ));
                }
                if min_trials < 2 {
                    return Err(ConfigError::invalid(
                        "min_trials",
                        format!("variance needs at least 2 trials, got {min_trials}"),
                    ));
                }
                if max_trials.is_some_and(|max| max < min_trials) {
                    return Err(ConfigError::invalid(
                        "max_trials",
                        format!("must be at least min_trials ({min_trials})"),
                    ));
                }
            }
            StoppingRule::Fixed { trials } => {
                if trials < 2 {
                    return Err(ConfigError::invalid(
                        "trials",
                        format!("variance needs at least 2 trials, got {trials}"),
                    ));
                }
            }
        }

        if self.topology.is_custom() {
            let matrix = self.matrix.as_ref().ok_or(ConfigError::MissingMatrix)?;
            if matrix.size() == 0 {
                return Err(ConfigError::EmptyPopulation);
            }
            matrix.ensure_complete()?;
        } else {
            self.populations.validate()?;
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(ContagionParams::default())
    }
}

/// Read a `size` x `size` adjacency matrix from a whitespace-separated file.
pub fn load_adjacency(path: &Path, size: usize) -> Result<AdjacencyMatrix, SimulatorError> {
    let text = std::fs::read_to_string(path)?;
    let matrix = AdjacencyMatrix::parse(size, &text)?;
    matrix.ensure_complete()?;
    info!(path = %path.display(), size, "Loaded adjacency matrix");
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_sweep_sizes() {
        let config = SimulatorConfig::default();
        let sizes = config.population_sizes();
        assert_eq!(sizes.first(), Some(&5));
        assert_eq!(sizes.last(), Some(&60));
        assert_eq!(sizes.len(), 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sweep_includes_max_only_when_reached() {
        let config = SimulatorConfig::default().with_populations(3, 10, 4);
        assert_eq!(config.population_sizes(), vec![3, 7]);
    }

    #[test]
    fn test_custom_runs_matrix_size_only() {
        let matrix = AdjacencyMatrix::from_rows(&[vec![0, 1], vec![1, 0]]);
        let config = SimulatorConfig::default()
            .with_populations(5, 50, 5)
            .with_matrix(matrix);
        assert_eq!(config.population_sizes(), vec![2]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configurations() {
        let bad_range = SimulatorConfig::default().with_populations(10, 5, 1);
        assert!(matches!(
            bad_range.validate(),
            Err(ConfigError::InvalidPopulationRange { .. })
        ));

        let zero_min = SimulatorConfig::default().with_populations(0, 5, 1);
        assert!(zero_min.validate().is_err());

        let bad_confidence = SimulatorConfig::default().with_confidence(1.5);
        assert!(matches!(
            bad_confidence.validate(),
            Err(ConfigError::InvalidParameter { name: "confidence", .. })
        ));

        let one_trial = SimulatorConfig::default().with_stopping(StoppingRule::Fixed { trials: 1 });
        assert!(one_trial.validate().is_err());

        let no_matrix = SimulatorConfig::default().with_topology(TopologyKind::Custom);
        assert_eq!(no_matrix.validate(), Err(ConfigError::MissingMatrix));

        let short = AdjacencyMatrix::parse(3, "0 1 1").unwrap();
        let short_matrix = SimulatorConfig::default().with_matrix(short);
        assert!(matches!(
            short_matrix.validate(),
            Err(ConfigError::UndersizedMatrix { expected: 9, found: 3 })
        ));
    }

    #[test]
    fn test_main_parameter_value() {
        let params = ContagionParams::new(1.5, 7.0, 0.5);
        assert_eq!(MainParameter::Gamma.value(&params), 1.5);
        assert_eq!(MainParameter::Mu.value(&params), 0.5);
        assert_eq!(MainParameter::C.value(&params), 7.0);
        assert_eq!(MainParameter::Mu.to_string(), "Mu");
    }

    #[test]
    fn test_load_adjacency_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 1 0\n1 0 2\n0 2 0").unwrap();

        let matrix = load_adjacency(file.path(), 3).unwrap();
        assert_eq!(matrix.size(), 3);
        assert!(matrix.is_complete());

        assert!(matches!(
            load_adjacency(file.path(), 4),
            Err(SimulatorError::Config(ConfigError::UndersizedMatrix { .. }))
        ));
    }

    #[test]
    fn test_load_adjacency_reports_bad_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0 1\nx 0").unwrap();
        assert!(matches!(
            load_adjacency(file.path(), 2),
            Err(SimulatorError::Config(ConfigError::MalformedMatrix { position: 2, .. }))
        ));
    }

    #[test]
    fn test_load_adjacency_missing_file() {
        assert!(matches!(
            load_adjacency(Path::new("/nonexistent/plaguesim/matrix.txt"), 2),
            Err(SimulatorError::Io(_))
        ));
    }
}
