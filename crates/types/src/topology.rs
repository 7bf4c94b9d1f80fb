//! Topology trait and its contact-graph shapes.

use crate::{AdjacencyMatrix, ConfigError, Edge, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of the contact graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopologyKind {
    /// Everyone is in contact with everyone else.
    #[default]
    Clique,
    /// Node 0 is the hub, every other node touches only the hub.
    Star,
    /// Each node touches its predecessor and successor, wrapping around.
    Ring,
    /// Edges and weights come from a supplied adjacency matrix.
    Custom,
}

impl TopologyKind {
    /// Whether the population is fixed by an external matrix rather than swept.
    pub fn is_custom(self) -> bool {
        matches!(self, TopologyKind::Custom)
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TopologyKind::Clique => "Clique",
            TopologyKind::Star => "Star",
            TopologyKind::Ring => "Ring",
            TopologyKind::Custom => "Custom",
        };
        f.write_str(name)
    }
}

/// Builds a contact graph for a population size.
///
/// Every returned graph has all nodes `Susceptible`. Implementations hold no
/// shared state, so one builder can serve concurrent population sizes.
pub trait Topology: Send + Sync {
    /// Which shape this builder produces.
    fn kind(&self) -> TopologyKind;

    /// Build the graph for `population` individuals.
    fn build(&self, population: usize) -> Result<Graph, ConfigError>;

    /// Population size fixed by this topology, if it cannot be swept.
    fn fixed_population(&self) -> Option<usize> {
        None
    }
}

/// Complete graph: an edge of weight 1 for every ordered pair `(i, j)`, `i != j`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clique;

impl Topology for Clique {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Clique
    }

    fn build(&self, population: usize) -> Result<Graph, ConfigError> {
        let mut graph = Graph::with_population(population);
        for i in 0..population {
            for j in (0..population).filter(|&j| j != i) {
                graph.add_edge(i, Edge::unit(j));
            }
        }
        Ok(graph)
    }
}

/// Hub-and-spoke graph centred on node 0, with mutual unit edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Star;

impl Topology for Star {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Star
    }

    fn build(&self, population: usize) -> Result<Graph, ConfigError> {
        let mut graph = Graph::with_population(population);
        for i in 1..population {
            graph.add_edge(0, Edge::unit(i));
        }
        for i in 1..population {
            graph.add_edge(i, Edge::unit(0));
        }
        Ok(graph)
    }
}

/// Cycle graph: node `i` has unit edges to `i - 1` and `i + 1` modulo N.
///
/// Below three nodes the wraparound is applied literally: a single node
/// points at itself twice, and two nodes point at each other twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ring;

impl Topology for Ring {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Ring
    }

    fn build(&self, population: usize) -> Result<Graph, ConfigError> {
        let mut graph = Graph::with_population(population);
        for i in 0..population {
            let prev = (i + population - 1) % population;
            let next = (i + 1) % population;
            graph.add_edge(i, Edge::unit(prev));
            graph.add_edge(i, Edge::unit(next));
        }
        Ok(graph)
    }
}

/// Graph read from a weighted adjacency matrix. Edges may be one-directional.
#[derive(Debug, Clone)]
pub struct Custom {
    matrix: AdjacencyMatrix,
}

impl Custom {
    pub fn new(matrix: AdjacencyMatrix) -> Self {
        Self { matrix }
    }
}

impl Topology for Custom {
    fn kind(&self) -> TopologyKind {
        TopologyKind::Custom
    }

    fn build(&self, population: usize) -> Result<Graph, ConfigError> {
        self.matrix.ensure_covers(population)?;

        let mut graph = Graph::with_population(population);
        for i in 0..population {
            for j in 0..population {
                if let Some(weight) = self.matrix.weight(i, j) {
                    graph.add_edge(i, Edge::new(NodeId(j), weight));
                }
            }
        }
        Ok(graph)
    }

    fn fixed_population(&self) -> Option<usize> {
        Some(self.matrix.size())
    }
}

/// Select the builder for a topology kind.
///
/// `matrix` is required for [`TopologyKind::Custom`] and ignored otherwise.
pub fn topology_for(
    kind: TopologyKind,
    matrix: Option<&AdjacencyMatrix>,
) -> Result<Box<dyn Topology>, ConfigError> {
    Ok(match kind {
        TopologyKind::Clique => Box::new(Clique),
        TopologyKind::Star => Box::new(Star),
        TopologyKind::Ring => Box::new(Ring),
        TopologyKind::Custom => {
            let matrix = matrix.ok_or(ConfigError::MissingMatrix)?;
            Box::new(Custom::new(matrix.clone()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContactWeight;

    #[test]
    fn test_clique_has_all_ordered_pairs() {
        let graph = Clique.build(5).unwrap();
        assert_eq!(graph.edge_count(), 5 * 4);
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(graph.has_edge(NodeId(i), NodeId(j)), i != j);
            }
        }
    }

    #[test]
    fn test_star_edges_are_mutual_with_hub() {
        let graph = Star.build(4).unwrap();
        assert_eq!(graph.edges(NodeId(0)).len(), 3);
        for i in 1..4 {
            assert_eq!(graph.edges(NodeId(i)), &[Edge::unit(0)]);
            assert!(graph.has_edge(NodeId(0), NodeId(i)));
        }
    }

    #[test]
    fn test_ring_wraps_at_both_ends() {
        let graph = Ring.build(6).unwrap();
        assert_eq!(graph.edges(NodeId(0)), &[Edge::unit(5), Edge::unit(1)]);
        assert_eq!(graph.edges(NodeId(5)), &[Edge::unit(4), Edge::unit(0)]);
        for i in 0..6 {
            assert_eq!(graph.edges(NodeId(i)).len(), 2);
        }
    }

    #[test]
    fn test_custom_uses_matrix_weights() {
        let matrix = AdjacencyMatrix::from_rows(&[vec![0, 2, 0], vec![0, 0, 0], vec![1, 5, 0]]);
        let topology = Custom::new(matrix);
        let graph = topology.build(3).unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.edges(NodeId(0)),
            &[Edge::new(NodeId(1), ContactWeight(2))]
        );
        assert!(graph.edges(NodeId(1)).is_empty());
        assert_eq!(
            graph.edges(NodeId(2)),
            &[
                Edge::new(NodeId(0), ContactWeight(1)),
                Edge::new(NodeId(1), ContactWeight(5))
            ]
        );
        assert_eq!(topology.fixed_population(), Some(3));
    }

    #[test]
    fn test_custom_rejects_undersized_matrix() {
        let matrix = AdjacencyMatrix::parse(3, "0 1 0 1").unwrap();
        let err = Custom::new(matrix).build(3).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UndersizedMatrix {
                expected: 9,
                found: 4
            }
        );
    }

    #[test]
    fn test_generated_topologies_start_susceptible() {
        for kind in [TopologyKind::Clique, TopologyKind::Star, TopologyKind::Ring] {
            let graph = topology_for(kind, None).unwrap().build(7).unwrap();
            assert_eq!(graph.infected_count(), 0, "{kind} starts infected");
        }
    }

    #[test]
    fn test_custom_without_matrix_fails() {
        assert_eq!(
            topology_for(TopologyKind::Custom, None).err(),
            Some(ConfigError::MissingMatrix)
        );
    }
}
