//! End-to-end sweeps over small, well-understood contagion setups.

use plaguesim_simulation::{ContagionParams, HazardMode};
use plaguesim_simulator::{MonteCarloDriver, SimulatorConfig, StoppingRule, MIN_TRIALS};
use plaguesim_types::{AdjacencyMatrix, TopologyKind};

#[test]
fn test_no_exogenous_rate_never_infects() {
    let config = SimulatorConfig::new(ContagionParams::new(1.0, 0.0, 1.0))
        .with_topology(TopologyKind::Clique)
        .with_populations(2, 2, 1)
        .with_seed(3);

    let report = MonteCarloDriver::new(config).unwrap().run().unwrap();
    assert_eq!(report.summaries.len(), 1);

    let summary = &report.summaries[0];
    assert_eq!(summary.mean, 0.0);
    assert_eq!(summary.half_width, 0.0);
    assert_eq!(summary.fraction(), 0.0);
    assert_eq!(summary.trials, MIN_TRIALS);
}

#[test]
fn test_strong_pressure_saturates_ring() {
    for mode in [HazardMode::Additive, HazardMode::Multiplicative] {
        let params =
            ContagionParams::new(mode.neutral_gamma(), 400.0, 0.01).with_hazard_mode(mode);
        let config = SimulatorConfig::new(params)
            .with_topology(TopologyKind::Ring)
            .with_populations(4, 4, 1)
            .with_seed(11);

        let report = MonteCarloDriver::new(config).unwrap().run().unwrap();
        let summary = &report.summaries[0];
        assert!(summary.trials >= MIN_TRIALS);
        assert!(
            summary.fraction() > 0.9,
            "{mode}: expected near-total infection, got {}",
            summary.fraction()
        );
    }
}

#[test]
fn test_overflowing_multiplicative_hazard_completes_sweep() {
    let config = SimulatorConfig::new(ContagionParams::new(1e200, 10.0, 1.0))
        .with_topology(TopologyKind::Clique)
        .with_populations(5, 5, 1)
        .with_horizon_factor(2.0)
        .with_seed(13);

    let report = MonteCarloDriver::new(config).unwrap().run().unwrap();
    let summary = &report.summaries[0];
    assert!(summary.trials >= MIN_TRIALS);
    assert!(summary.fraction() > 0.0 && summary.fraction() <= 1.0);
}

#[test]
fn test_isolated_nodes_ignore_hazard_mode() {
    let matrix = AdjacencyMatrix::from_rows(&[vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0]]);
    let base = SimulatorConfig::new(ContagionParams::new(2.0, 3.0, 1.0))
        .with_matrix(matrix)
        .with_seed(5);

    let multiplicative =
        MonteCarloDriver::new(base.clone().with_hazard_mode(HazardMode::Multiplicative))
            .unwrap()
            .run()
            .unwrap();
    let additive = MonteCarloDriver::new(base.with_hazard_mode(HazardMode::Additive))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(multiplicative.summaries, additive.summaries);
    assert_eq!(multiplicative.summaries[0].population, 3);
}

#[test]
fn test_every_population_gets_minimum_trials() {
    let config = SimulatorConfig::new(ContagionParams::new(1.1, 10.0, 1.0))
        .with_topology(TopologyKind::Star)
        .with_populations(3, 9, 3)
        .with_horizon_factor(2.0)
        .with_confidence(0.5)
        .with_seed(21);

    let report = MonteCarloDriver::new(config).unwrap().run().unwrap();
    assert_eq!(report.summaries.len(), 3);
    for summary in &report.summaries {
        assert!(summary.trials >= MIN_TRIALS);
        assert!(summary.fraction() >= 0.0 && summary.fraction() <= 1.0);
    }
}

#[test]
fn test_trial_cap_bounds_sampling() {
    let stopping = StoppingRule::sequential(0.001).with_max_trials(40);
    let config = SimulatorConfig::new(ContagionParams::new(1.1, 10.0, 1.0))
        .with_populations(5, 5, 1)
        .with_horizon_factor(2.0)
        .with_stopping(stopping)
        .with_seed(8);

    let report = MonteCarloDriver::new(config).unwrap().run().unwrap();
    assert!(report.summaries[0].trials <= 40);
    assert!(report.summaries[0].trials >= MIN_TRIALS);
}
