//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Individual identifier: the 0-based index of a node in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Get the raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Contact weight of an edge. Always at least 1; a zero entry in an
/// adjacency matrix means "no edge" and never produces a `ContactWeight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactWeight(pub u32);

impl ContactWeight {
    /// Weight used by every generated topology.
    pub const UNIT: Self = ContactWeight(1);

    /// Create from a raw matrix entry. Returns `None` for zero (no edge).
    pub fn from_entry(entry: u32) -> Option<Self> {
        if entry == 0 {
            None
        } else {
            Some(ContactWeight(entry))
        }
    }

    /// Weight as a floating point multiplier.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for ContactWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status of an individual under the SIS process.
///
/// There is no recovered/immune state: a cured node is susceptible again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    #[default]
    Susceptible,
    Infected,
}

impl HealthStatus {
    pub fn is_infected(self) -> bool {
        matches!(self, HealthStatus::Infected)
    }

    pub fn is_susceptible(self) -> bool {
        matches!(self, HealthStatus::Susceptible)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Susceptible => write!(f, "susceptible"),
            HealthStatus::Infected => write!(f, "infected"),
        }
    }
}
