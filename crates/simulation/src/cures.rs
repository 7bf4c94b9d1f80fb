//! Pending cures of infected individuals.

use plaguesim_types::NodeId;

/// Remaining time until an infected node is cured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCure {
    pub node: NodeId,
    pub remaining: f64,
}

/// Pending cures ordered by remaining time, earliest first.
///
/// Holds exactly one entry per infected node: an entry is inserted when its
/// node is infected and removed when the node is cured. Remaining times are
/// sampled once and afterwards only shifted by elapsed time, never resampled.
#[derive(Debug, Clone, Default)]
pub struct PendingCures {
    entries: Vec<PendingCure>,
}

impl PendingCures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cure, keeping the collection ordered.
    ///
    /// Equal remaining times keep insertion order.
    pub fn insert(&mut self, node: NodeId, remaining: f64) {
        debug_assert!(
            !self.contains(node),
            "{node} already has a pending cure"
        );
        let at = self.entries.partition_point(|c| c.remaining <= remaining);
        self.entries.insert(at, PendingCure { node, remaining });
    }

    /// The cure that fires next.
    pub fn earliest(&self) -> Option<&PendingCure> {
        self.entries.first()
    }

    /// Remove and return the earliest cure.
    pub fn pop_earliest(&mut self) -> Option<PendingCure> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Subtract `elapsed` from every remaining time.
    ///
    /// `elapsed` never exceeds the earliest remaining time, so the order is
    /// preserved and no remaining time goes negative.
    pub fn shift(&mut self, elapsed: f64) {
        for cure in &mut self.entries {
            cure.remaining = (cure.remaining - elapsed).max(0.0);
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.iter().any(|c| c.node == node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingCure> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_ascending_order() {
        let mut cures = PendingCures::new();
        cures.insert(NodeId(0), 3.0);
        cures.insert(NodeId(1), 1.0);
        cures.insert(NodeId(2), 2.0);

        let order: Vec<_> = cures.iter().map(|c| c.node).collect();
        assert_eq!(order, vec![NodeId(1), NodeId(2), NodeId(0)]);
        assert_eq!(cures.earliest().map(|c| c.node), Some(NodeId(1)));
    }

    #[test]
    fn test_pop_and_shift() {
        let mut cures = PendingCures::new();
        cures.insert(NodeId(4), 0.5);
        cures.insert(NodeId(5), 2.0);

        let fired = cures.pop_earliest().unwrap();
        assert_eq!(fired.node, NodeId(4));
        cures.shift(fired.remaining);

        assert_eq!(cures.len(), 1);
        assert_eq!(cures.earliest().unwrap().remaining, 1.5);
        assert!(!cures.contains(NodeId(4)));
        assert!(cures.contains(NodeId(5)));
    }

    #[test]
    fn test_empty_queue() {
        let mut cures = PendingCures::new();
        assert!(cures.is_empty());
        assert!(cures.earliest().is_none());
        assert!(cures.pop_earliest().is_none());
    }
}
