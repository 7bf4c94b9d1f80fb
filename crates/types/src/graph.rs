//! Weighted directed contact graph.

use crate::{ContactWeight, HealthStatus, NodeId};
use serde::{Deserialize, Serialize};

/// Directed contact from the owning node to `dest`.
///
/// Edges are immutable once the graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Destination node.
    pub dest: NodeId,
    /// Contact weight scaling infection pressure across this edge.
    pub weight: ContactWeight,
}

impl Edge {
    pub fn new(dest: NodeId, weight: ContactWeight) -> Self {
        Self { dest, weight }
    }

    /// Edge of weight 1, as used by every generated topology.
    pub fn unit(dest: usize) -> Self {
        Self::new(NodeId(dest), ContactWeight::UNIT)
    }
}

/// An individual in the population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Position in the graph.
    pub id: NodeId,
    /// Current health status. The only field that changes during a trial.
    pub status: HealthStatus,
    /// Outgoing contacts. The infection status of their destinations drives
    /// this node's endogenous hazard.
    pub edges: Vec<Edge>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            status: HealthStatus::Susceptible,
            edges: Vec::new(),
        }
    }
}

/// Ordered collection of nodes, each owning its outgoing edge list.
///
/// Invariant: every edge destination is a valid node index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Create a graph of `population` susceptible, unconnected nodes.
    pub fn with_population(population: usize) -> Self {
        Self {
            nodes: (0..population).map(|i| Node::new(NodeId(i))).collect(),
        }
    }

    /// Add a directed edge. Both ends must already exist.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn add_edge(&mut self, from: usize, edge: Edge) {
        assert!(
            edge.dest.index() < self.nodes.len(),
            "edge destination {} out of range for {} nodes",
            edge.dest,
            self.nodes.len()
        );
        self.nodes[from].edges.push(edge);
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Outgoing edges of a node (empty for an unknown id).
    pub fn edges(&self, id: NodeId) -> &[Edge] {
        self.node(id).map(|n| n.edges.as_slice()).unwrap_or(&[])
    }

    pub fn status(&self, id: NodeId) -> HealthStatus {
        self.nodes[id.index()].status
    }

    pub fn set_status(&mut self, id: NodeId, status: HealthStatus) {
        self.nodes[id.index()].status = status;
    }

    /// Return every node to `Susceptible`. Called at the start of each trial.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.status = HealthStatus::Susceptible;
        }
    }

    pub fn infected_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.status.is_infected()).count()
    }

    /// Iterate over the ids of susceptible nodes in index order.
    pub fn susceptible(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.status.is_susceptible())
            .map(|n| n.id)
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Check whether `from` has an edge to `to`.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges(from).iter().any(|e| e.dest == to)
    }
}
