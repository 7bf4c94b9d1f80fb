//! Instantaneous infection hazard of susceptible individuals.

use crate::{ContagionParams, SimulationError};
use plaguesim_types::{ConfigError, Graph, NodeId};

/// Infection hazard of one susceptible node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    pub node: NodeId,
    pub rate: f64,
}

/// Compute the hazard of every susceptible node of `graph`.
///
/// Each node starts from the exogenous baseline `C / N`, then every infected
/// destination of its outgoing edges folds `gamma * weight` in according to
/// the configured [`crate::HazardMode`]. Infected nodes are not reported.
/// Results are in node index order.
pub fn susceptible_hazards(
    graph: &Graph,
    params: &ContagionParams,
) -> Result<Vec<Hazard>, SimulationError> {
    if graph.is_empty() {
        return Err(ConfigError::EmptyPopulation.into());
    }
    let baseline = params.baseline_rate(graph.len())?;

    let hazards = graph
        .nodes()
        .iter()
        .filter(|node| node.status.is_susceptible())
        .map(|node| {
            let rate = node
                .edges
                .iter()
                .filter(|edge| graph.status(edge.dest).is_infected())
                .fold(baseline, |rate, edge| {
                    params
                        .hazard_mode
                        .combine(rate, params.gamma, edge.weight.as_f64())
                });
            Hazard {
                node: node.id,
                rate,
            }
        })
        .collect();

    Ok(hazards)
}
