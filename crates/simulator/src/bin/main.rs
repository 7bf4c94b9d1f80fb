//! PlagueSim CLI
//!
//! Estimate the infected fraction of an SIS contagion across a range of
//! population sizes.
//!
//! # Example
//!
//! ```bash
//! # Sweep a clique from 5 to 60 nodes with a fixed seed
//! plaguesim --gamma 1.1 --exogenous 10 --mu 1 --seed 42 -o clique.csv
//!
//! # Ring topology, additive hazards, bounds layout
//! plaguesim --topology ring --hazard-mode additive --layout bounds
//!
//! # Custom 8x8 weighted adjacency matrix
//! plaguesim --topology custom --matrix contacts.txt --population 8
//! ```

use clap::{Parser, ValueEnum};
use plaguesim_simulation::{ContagionParams, HazardMode};
use plaguesim_simulator::{
    load_adjacency, MainParameter, MonteCarloDriver, ReportLayout, SimulatorConfig,
    SimulatorError, StoppingRule, SweepReport, MIN_TRIALS,
};
use plaguesim_types::{ConfigError, TopologyKind};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TopologyArg {
    Clique,
    Star,
    Ring,
    Custom,
}

impl From<TopologyArg> for TopologyKind {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Clique => TopologyKind::Clique,
            TopologyArg::Star => TopologyKind::Star,
            TopologyArg::Ring => TopologyKind::Ring,
            TopologyArg::Custom => TopologyKind::Custom,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HazardArg {
    Multiplicative,
    Additive,
}

impl From<HazardArg> for HazardMode {
    fn from(arg: HazardArg) -> Self {
        match arg {
            HazardArg::Multiplicative => HazardMode::Multiplicative,
            HazardArg::Additive => HazardMode::Additive,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MainParameterArg {
    Gamma,
    Mu,
    C,
}

impl From<MainParameterArg> for MainParameter {
    fn from(arg: MainParameterArg) -> Self {
        match arg {
            MainParameterArg::Gamma => MainParameter::Gamma,
            MainParameterArg::Mu => MainParameter::Mu,
            MainParameterArg::C => MainParameter::C,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Fraction,
    Bounds,
    Json,
}

impl From<LayoutArg> for ReportLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Fraction => ReportLayout::Fraction,
            LayoutArg::Bounds => ReportLayout::Bounds,
            LayoutArg::Json => ReportLayout::Json,
        }
    }
}

/// PlagueSim
///
/// Runs stochastic SIS trials on a contact graph until the confidence
/// interval of the infected count is tight enough, for every population
/// size in the sweep. Reproducible when the same seed is used.
#[derive(Parser, Debug)]
#[command(name = "plaguesim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Endogenous infection multiplier (gamma)
    #[arg(short = 'e', long, default_value = "1.1")]
    gamma: f64,

    /// Total exogenous infection rate (C), split evenly over the population
    #[arg(short = 't', long, default_value = "10.0")]
    exogenous: f64,

    /// Healing rate (mu)
    #[arg(short = 'm', long = "mu", default_value = "1.0")]
    mu: f64,

    /// Smallest population size
    #[arg(long, default_value = "5")]
    min_pop: usize,

    /// Largest population size
    #[arg(long, default_value = "60")]
    max_pop: usize,

    /// Population size increment
    #[arg(short = 'i', long, default_value = "5")]
    increment: usize,

    /// Maximum relative half-width of the confidence band before stopping
    #[arg(short = 'c', long, default_value = "0.1")]
    confidence: f64,

    /// Minimum trials per population size
    #[arg(long, default_value_t = MIN_TRIALS)]
    min_trials: usize,

    /// Upper bound on trials per population size
    #[arg(long)]
    max_trials: Option<usize>,

    /// Run exactly this many trials per population size instead of the
    /// sequential confidence rule
    #[arg(long, conflicts_with_all = ["confidence", "min_trials", "max_trials"])]
    fixed_trials: Option<usize>,

    /// Contact graph shape
    #[arg(short = 'g', long, value_enum, default_value = "clique")]
    topology: TopologyArg,

    /// How infected contacts combine with the exogenous rate
    #[arg(long, value_enum, default_value = "multiplicative")]
    hazard_mode: HazardArg,

    /// Whitespace-separated weighted adjacency matrix (custom topology)
    #[arg(long, required_if_eq("topology", "custom"))]
    matrix: Option<PathBuf>,

    /// Population size of the adjacency matrix (custom topology)
    #[arg(long, required_if_eq("topology", "custom"))]
    population: Option<usize>,

    /// Simulated time per individual before a trial is cut off
    #[arg(long, default_value = "10.0")]
    horizon_factor: f64,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Parameter named in the report header
    #[arg(short = 'p', long, value_enum, default_value = "gamma")]
    main_parameter: MainParameterArg,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Report layout
    #[arg(long, value_enum, default_value = "fraction")]
    layout: LayoutArg,

    /// Run population sizes in parallel
    #[arg(long)]
    parallel: bool,
}

const CUSTOM_ONLY: &str = "only valid with the custom topology";

impl Args {
    fn stopping_rule(&self) -> StoppingRule {
        match self.fixed_trials {
            Some(trials) => StoppingRule::Fixed { trials },
            None => StoppingRule::Sequential {
                min_trials: self.min_trials,
                confidence: self.confidence,
                max_trials: self.max_trials,
            },
        }
    }

    fn into_config(self, seed: u64) -> Result<SimulatorConfig, SimulatorError> {
        let contagion = ContagionParams::new(self.gamma, self.exogenous, self.mu)
            .with_hazard_mode(self.hazard_mode.into());

        let mut config = SimulatorConfig::new(contagion)
            .with_populations(self.min_pop, self.max_pop, self.increment)
            .with_topology(self.topology.into())
            .with_stopping(self.stopping_rule())
            .with_horizon_factor(self.horizon_factor)
            .with_seed(seed)
            .with_main_parameter(self.main_parameter.into());

        match self.topology {
            TopologyArg::Custom => {
                let path = self.matrix.ok_or(ConfigError::MissingMatrix)?;
                let population = self.population.ok_or_else(|| {
                    ConfigError::invalid("population", "required with the custom topology")
                })?;
                config = config.with_matrix(load_adjacency(&path, population)?);
            }
            _ if self.matrix.is_some() => {
                return Err(ConfigError::invalid("matrix", CUSTOM_ONLY).into());
            }
            _ if self.population.is_some() => {
                return Err(ConfigError::invalid("population", CUSTOM_ONLY).into());
            }
            _ => {}
        }
        Ok(config)
    }
}

fn run(args: Args) -> Result<(), SimulatorError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let layout: ReportLayout = args.layout.into();
    let parallel = args.parallel;
    let output = args.output.clone();

    info!(seed, parallel, "Starting simulation");

    let config = args.into_config(seed)?;
    let driver = MonteCarloDriver::new(config)?;

    let mut out: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if parallel || layout == ReportLayout::Json {
        let report = if parallel {
            driver.run_parallel()?
        } else {
            driver.run()?
        };
        report.write_to(&mut out, layout)?;
    } else {
        // Stream lines so finished populations survive a later failure.
        writeln!(out, "{}", driver.report(Vec::new()).header())?;
        driver.run_with(|summary| {
            writeln!(out, "{}", SweepReport::line(summary, layout))?;
            out.flush()?;
            Ok(())
        })?;
    }
    out.flush()?;

    if let Some(path) = output {
        info!(path = %path.display(), "Simulation finished");
    }
    Ok(())
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,plaguesim_simulator=info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Simulation failed");
            ExitCode::FAILURE
        }
    }
}
