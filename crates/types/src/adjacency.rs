//! Weighted adjacency matrix ingestion for the custom topology.
//!
//! The textual form is row-major, whitespace-separated non-negative
//! integers. Entry `(i, j)` is the weight of the edge from node `i` to node
//! `j`; zero means no edge.

use crate::{ConfigError, ContactWeight};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A square adjacency matrix of declared size `size`.
///
/// The matrix may hold fewer than `size * size` entries if the input was
/// short; [`AdjacencyMatrix::ensure_complete`] reports that, and the custom
/// topology refuses to build from an incomplete matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    size: usize,
    entries: Vec<u32>,
}

impl AdjacencyMatrix {
    /// Create from row-major entries. Entries beyond `size * size` are dropped.
    pub fn new(size: usize, mut entries: Vec<u32>) -> Self {
        let expected = size * size;
        if entries.len() > expected {
            warn!(
                size,
                supplied = entries.len(),
                "Ignoring adjacency entries beyond the declared size"
            );
            entries.truncate(expected);
        }
        Self { size, entries }
    }

    /// Parse whitespace-separated entries for a `size` x `size` matrix.
    ///
    /// Fails on the first token that is not a non-negative integer. A short
    /// input is accepted here and rejected when the graph is built.
    pub fn parse(size: usize, text: &str) -> Result<Self, ConfigError> {
        let expected = size * size;
        let mut entries = Vec::with_capacity(expected);
        for (position, token) in text.split_whitespace().enumerate() {
            let value = token
                .parse::<u32>()
                .map_err(|_| ConfigError::MalformedMatrix {
                    position,
                    token: token.to_string(),
                })?;
            entries.push(value);
        }
        Ok(Self::new(size, entries))
    }

    /// Build a matrix from nested rows. Handy for tests and embedders.
    pub fn from_rows(rows: &[Vec<u32>]) -> Self {
        let size = rows.len();
        Self::new(size, rows.iter().flatten().copied().collect())
    }

    /// Declared number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of entries actually obtained.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.len() >= self.size * self.size
    }

    /// Fail with [`ConfigError::UndersizedMatrix`] unless every entry is present.
    pub fn ensure_complete(&self) -> Result<(), ConfigError> {
        self.ensure_covers(self.size)
    }

    /// Fail unless the matrix holds at least `population * population` entries.
    pub fn ensure_covers(&self, population: usize) -> Result<(), ConfigError> {
        let expected = population * population;
        if self.entries.len() < expected || population > self.size {
            return Err(ConfigError::UndersizedMatrix {
                expected,
                found: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Weight of the edge `from -> to`, or `None` when absent.
    pub fn weight(&self, from: usize, to: usize) -> Option<ContactWeight> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.entries
            .get(from * self.size + to)
            .copied()
            .and_then(ContactWeight::from_entry)
    }
}
