//! Single stochastic trajectory up to a time horizon.

use crate::{ContagionParams, EventScheduler, RandomStream, SchedulerStats, SimulationError};
use plaguesim_types::{ConfigError, Graph};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default horizon factor: a population of N is simulated for `10 * N` time units.
pub const DEFAULT_HORIZON_FACTOR: f64 = 10.0;

/// Why a trial stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialEnd {
    /// The next event would have fired past the horizon and was discarded.
    Horizon,
    /// No further event could ever occur.
    Absorbed,
}

/// Result of one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Infected individuals in the last applied state.
    pub infected: usize,
    /// Population size of the trial.
    pub population: usize,
    /// Simulated time of the last applied event.
    pub elapsed: f64,
    /// Infections applied.
    pub infections: u64,
    /// Cures applied.
    pub cures: u64,
    pub end: TrialEnd,
}

/// Drives trajectories from an all-susceptible start to a horizon that
/// scales with population size.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    params: ContagionParams,
    horizon_factor: f64,
}

impl TrialRunner {
    pub fn new(params: ContagionParams) -> Self {
        Self {
            params,
            horizon_factor: DEFAULT_HORIZON_FACTOR,
        }
    }

    /// Set the horizon factor (simulated time per individual).
    pub fn with_horizon_factor(mut self, factor: f64) -> Self {
        self.horizon_factor = factor;
        self
    }

    pub fn params(&self) -> &ContagionParams {
        &self.params
    }

    /// Simulated time horizon for a population.
    pub fn horizon(&self, population: usize) -> f64 {
        self.horizon_factor * population as f64
    }

    /// Run one trial on `graph`.
    ///
    /// The graph is reset to all-susceptible first; its edges are reused.
    /// An event whose time would pass the horizon is discarded, so the
    /// outcome is the infected count of the last applied state.
    pub fn run(
        &self,
        graph: &mut Graph,
        rng: &mut RandomStream,
    ) -> Result<TrialOutcome, SimulationError> {
        if graph.is_empty() {
            return Err(ConfigError::EmptyPopulation.into());
        }
        graph.reset();

        let horizon = self.horizon(graph.len());
        let mut scheduler = EventScheduler::new();

        let end = loop {
            if scheduler.now() >= horizon {
                break TrialEnd::Horizon;
            }
            let Some(event) = scheduler.next_event(graph, &self.params, rng)? else {
                break TrialEnd::Absorbed;
            };
            if scheduler.now() + event.delay > horizon {
                break TrialEnd::Horizon;
            }
            scheduler.apply(graph, event, &self.params, rng)?;
        };

        let SchedulerStats { infections, cures } = scheduler.stats();
        let outcome = TrialOutcome {
            infected: graph.infected_count(),
            population: graph.len(),
            elapsed: scheduler.now(),
            infections,
            cures,
            end,
        };

        debug!(
            population = outcome.population,
            infected = outcome.infected,
            elapsed = outcome.elapsed,
            events = infections + cures,
            end = ?outcome.end,
            "Trial finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HazardMode;
    use plaguesim_types::{AdjacencyMatrix, Clique, Custom, Ring, Topology};
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_no_exogenous_pressure_stays_clean() {
        let runner = TrialRunner::new(ContagionParams::new(1.0, 0.0, 1.0));
        let mut graph = Clique.build(2).unwrap();
        let mut rng = RandomStream::new(5);

        let outcome = runner.run(&mut graph, &mut rng).unwrap();
        assert_eq!(outcome.infected, 0);
        assert_eq!(outcome.end, TrialEnd::Absorbed);
        assert_eq!(outcome.infections, 0);
        assert!(logs_contain("Trial finished"));
    }

    #[test]
    fn test_outcome_within_population_and_horizon() {
        let runner = TrialRunner::new(ContagionParams::default());
        let mut graph = Clique.build(6).unwrap();
        let mut rng = RandomStream::new(17);

        for _ in 0..20 {
            let outcome = runner.run(&mut graph, &mut rng).unwrap();
            assert!(outcome.infected <= 6);
            assert!(outcome.elapsed <= runner.horizon(6));
            assert_eq!(outcome.end, TrialEnd::Horizon);
            assert_eq!(
                outcome.infections - outcome.cures,
                outcome.infected as u64
            );
        }
    }

    #[test]
    fn test_trial_resets_previous_state() {
        let runner = TrialRunner::new(ContagionParams::default()).with_horizon_factor(0.0);
        let mut graph = Clique.build(3).unwrap();
        graph.set_status(plaguesim_types::NodeId(1), plaguesim_types::HealthStatus::Infected);
        let mut rng = RandomStream::new(1);

        let outcome = runner.run(&mut graph, &mut rng).unwrap();
        assert_eq!(outcome.infected, 0);
        assert_eq!(outcome.elapsed, 0.0);
    }

    #[test]
    fn test_strong_exogenous_pressure_saturates_ring() {
        for mode in [HazardMode::Additive, HazardMode::Multiplicative] {
            let params = ContagionParams::new(mode.neutral_gamma(), 400.0, 0.01)
                .with_hazard_mode(mode);
            let runner = TrialRunner::new(params);
            let mut graph = Ring.build(4).unwrap();
            let mut rng = RandomStream::new(23);

            let total: usize = (0..50)
                .map(|_| runner.run(&mut graph, &mut rng).unwrap().infected)
                .sum();
            assert!(total as f64 / (50.0 * 4.0) > 0.9, "{mode} mode");
        }
    }

    #[test]
    fn test_huge_multiplier_completes_trial() {
        let runner = TrialRunner::new(ContagionParams::new(1e200, 10.0, 1.0));
        let mut graph = Clique.build(5).unwrap();
        let mut rng = RandomStream::new(31);

        let outcome = runner.run(&mut graph, &mut rng).unwrap();
        assert_eq!(outcome.end, TrialEnd::Horizon);
        assert!(outcome.infected <= 5);
        assert_eq!(outcome.infections - outcome.cures, outcome.infected as u64);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let runner = TrialRunner::new(ContagionParams::default());
        let matrix = AdjacencyMatrix::from_rows(&[vec![0, 1, 0], vec![2, 0, 1], vec![0, 1, 0]]);
        let topology = Custom::new(matrix);

        let mut a = topology.build(3).unwrap();
        let mut b = topology.build(3).unwrap();
        let first = runner.run(&mut a, &mut RandomStream::new(9)).unwrap();
        let second = runner.run(&mut b, &mut RandomStream::new(9)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_graph_rejected() {
        let runner = TrialRunner::new(ContagionParams::default());
        let err = runner
            .run(&mut Graph::default(), &mut RandomStream::new(0))
            .unwrap_err();
        assert_eq!(err, SimulationError::Config(ConfigError::EmptyPopulation));
    }
}
