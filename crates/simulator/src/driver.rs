//! Monte Carlo driver: repeated trials per population size and the sweep.

use crate::{OutcomeStats, SimulatorConfig, SimulatorError, SweepReport};
use plaguesim_simulation::{RandomStream, TrialRunner};
use plaguesim_types::{topology_for, ConfigError, Topology};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Summary statistics for one population size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSummary {
    /// Population size.
    pub population: usize,
    /// Number of trial outcomes collected.
    pub trials: usize,
    /// Sample mean of infected counts.
    pub mean: f64,
    /// Bessel-corrected sample variance of infected counts.
    pub variance: f64,
    /// Half-width of the confidence band around `mean`.
    pub half_width: f64,
}

impl PopulationSummary {
    /// Estimated probability that an individual is infected.
    pub fn fraction(&self) -> f64 {
        self.mean / self.population as f64
    }

    pub fn lower(&self) -> f64 {
        self.mean - self.half_width
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.half_width
    }

    pub fn lower_fraction(&self) -> f64 {
        self.lower() / self.population as f64
    }

    pub fn upper_fraction(&self) -> f64 {
        self.upper() / self.population as f64
    }

    fn from_stats(population: usize, stats: &OutcomeStats) -> Result<Self, SimulatorError> {
        Ok(Self {
            population,
            trials: stats.count(),
            mean: stats.mean()?,
            variance: stats.variance()?,
            half_width: stats.half_width()?,
        })
    }
}

/// Repeats trials per population size until the stopping rule is met.
///
/// Every population size draws from its own random stream derived from the
/// configured seed, so sequential and parallel sweeps agree exactly.
pub struct MonteCarloDriver {
    config: SimulatorConfig,
    topology: Box<dyn Topology>,
    runner: TrialRunner,
}

impl MonteCarloDriver {
    /// Validate the configuration and prepare the driver.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        config.validate()?;
        let topology = topology_for(config.topology, config.matrix.as_ref())?;
        let runner =
            TrialRunner::new(config.contagion).with_horizon_factor(config.horizon_factor);

        info!(
            topology = %config.topology,
            hazard_mode = %config.contagion.hazard_mode,
            gamma = config.contagion.gamma,
            exogenous_budget = config.contagion.exogenous_budget,
            cure_rate = config.contagion.cure_rate,
            seed = config.seed,
            "Monte Carlo driver ready"
        );

        Ok(Self {
            config,
            topology,
            runner,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Population sizes the sweep visits, in order.
    pub fn populations(&self) -> Vec<usize> {
        match self.topology.fixed_population() {
            Some(population) => vec![population],
            None => self.config.population_sizes(),
        }
    }

    /// Run trials for one population size until the stopping rule is met.
    pub fn run_population(&self, population: usize) -> Result<PopulationSummary, SimulatorError> {
        if population == 0 {
            return Err(ConfigError::EmptyPopulation.into());
        }
        let mut graph = self.topology.build(population)?;
        let mut rng = RandomStream::for_population(self.config.seed, population);
        let mut stats = OutcomeStats::new();

        while self.config.stopping.should_continue(&stats)? {
            let outcome = self.runner.run(&mut graph, &mut rng)?;
            stats.record(outcome.infected);
            debug!(
                population,
                trial = stats.count(),
                infected = outcome.infected,
                "Recorded trial outcome"
            );
        }

        let summary = PopulationSummary::from_stats(population, &stats)?;
        info!(
            population,
            trials = summary.trials,
            mean = summary.mean,
            fraction = summary.fraction(),
            lower = summary.lower(),
            upper = summary.upper(),
            "Population finished"
        );
        Ok(summary)
    }

    /// Sweep every population size in order, handing each summary to `sink`
    /// as soon as it is complete.
    ///
    /// If a later population size fails, summaries already passed to `sink`
    /// remain valid.
    pub fn run_with<F>(&self, mut sink: F) -> Result<(), SimulatorError>
    where
        F: FnMut(&PopulationSummary) -> Result<(), SimulatorError>,
    {
        for population in self.populations() {
            let summary = self.run_population(population)?;
            sink(&summary)?;
        }
        Ok(())
    }

    /// Sweep every population size in order.
    pub fn run(&self) -> Result<SweepReport, SimulatorError> {
        let mut summaries = Vec::new();
        self.run_with(|summary| {
            summaries.push(summary.clone());
            Ok(())
        })?;
        Ok(self.report(summaries))
    }

    /// Sweep population sizes concurrently on the rayon pool.
    ///
    /// Produces the same summaries as [`MonteCarloDriver::run`].
    pub fn run_parallel(&self) -> Result<SweepReport, SimulatorError> {
        let summaries = self
            .populations()
            .into_par_iter()
            .map(|population| self.run_population(population))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.report(summaries))
    }

    /// Wrap summaries into a report labelled with this configuration.
    pub fn report(&self, summaries: Vec<PopulationSummary>) -> SweepReport {
        SweepReport::new(&self.config, summaries)
    }
}
