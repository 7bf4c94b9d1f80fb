//! Core types for PlagueSim.
//!
//! This crate holds the contact graph that the contagion process runs on
//! and the topology builders that produce it:
//!
//! - [`Graph`], [`Node`], [`Edge`]: a weighted directed contact graph whose
//!   edges are fixed once built and whose node statuses change during a trial.
//! - [`Topology`]: one `build(N) -> Graph` capability per shape
//!   ([`Clique`], [`Star`], [`Ring`], [`Custom`]).
//! - [`AdjacencyMatrix`]: weighted adjacency input for the custom topology.

mod adjacency;
mod error;
mod graph;
mod identifiers;
mod topology;

pub use adjacency::AdjacencyMatrix;
pub use error::ConfigError;
pub use graph::{Edge, Graph, Node};
pub use identifiers::{ContactWeight, HealthStatus, NodeId};
pub use topology::{topology_for, Clique, Custom, Ring, Star, Topology, TopologyKind};
