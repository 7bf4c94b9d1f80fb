//! Competing-event scheduler.
//!
//! Each step races a freshly sampled infection time for every susceptible
//! node against the earliest pending cure. Because exponential waiting times
//! are memoryless, infection candidates are redrawn from scratch every step,
//! while pending cures that did not fire are only shifted by the elapsed time.

use crate::hazard::susceptible_hazards;
use crate::{ContagionParams, PendingCures, RandomStream, SimulationError};
use plaguesim_types::{Graph, HealthStatus, NodeId};
use tracing::trace;

/// What happens when an event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A susceptible node becomes infected.
    Infection,
    /// An infected node recovers and is susceptible again.
    Cure,
}

/// The next event of a trajectory, not yet applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    pub kind: EventKind,
    pub node: NodeId,
    /// Simulated time from now until the event fires.
    pub delay: f64,
}

/// Counters for applied events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    pub infections: u64,
    pub cures: u64,
}

impl SchedulerStats {
    pub fn events(&self) -> u64 {
        self.infections + self.cures
    }
}

/// Advances one trajectory event by event.
///
/// Invariant: between steps, the number of pending cures equals the number
/// of infected nodes in the graph being driven.
#[derive(Debug, Default)]
pub struct EventScheduler {
    cures: PendingCures,
    now: f64,
    stats: SchedulerStats,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all pending cures and rewind the clock to zero.
    pub fn reset(&mut self) {
        self.cures.clear();
        self.now = 0.0;
        self.stats = SchedulerStats::default();
    }

    /// Simulated time elapsed so far.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_cures(&self) -> &PendingCures {
        &self.cures
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Sample the earliest infection candidate over all susceptible nodes.
    ///
    /// Nodes with zero hazard can never be infected and draw nothing. Ties
    /// keep the first node in index order.
    fn next_infection(
        &self,
        graph: &Graph,
        params: &ContagionParams,
        rng: &mut RandomStream,
    ) -> Result<Option<ScheduledEvent>, SimulationError> {
        let mut best: Option<ScheduledEvent> = None;
        for hazard in susceptible_hazards(graph, params)? {
            if hazard.rate == 0.0 {
                continue;
            }
            let delay = rng.exponential(hazard.rate)?;
            if best.map_or(true, |b| delay < b.delay) {
                best = Some(ScheduledEvent {
                    kind: EventKind::Infection,
                    node: hazard.node,
                    delay,
                });
            }
        }
        Ok(best)
    }

    /// Determine the next event without applying it.
    ///
    /// Returns `None` in the absorbing state: no susceptible node can be
    /// infected and no cure is pending, so nothing can ever happen again.
    pub fn next_event(
        &self,
        graph: &Graph,
        params: &ContagionParams,
        rng: &mut RandomStream,
    ) -> Result<Option<ScheduledEvent>, SimulationError> {
        let infection = self.next_infection(graph, params, rng)?;
        let cure = self.cures.earliest().map(|c| ScheduledEvent {
            kind: EventKind::Cure,
            node: c.node,
            delay: c.remaining,
        });

        Ok(match (infection, cure) {
            (Some(inf), Some(cure)) if inf.delay < cure.delay => Some(inf),
            (Some(_), Some(cure)) => Some(cure),
            (Some(inf), None) => Some(inf),
            (None, cure) => cure,
        })
    }

    /// Apply an event previously returned by [`EventScheduler::next_event`]
    /// for the current state.
    pub fn apply(
        &mut self,
        graph: &mut Graph,
        event: ScheduledEvent,
        params: &ContagionParams,
        rng: &mut RandomStream,
    ) -> Result<(), SimulationError> {
        match event.kind {
            EventKind::Infection => {
                let cure_in = rng.exponential(params.cure_rate)?;
                self.cures.shift(event.delay);
                self.cures.insert(event.node, cure_in);
                graph.set_status(event.node, HealthStatus::Infected);
                self.stats.infections += 1;
            }
            EventKind::Cure => {
                let fired = self.cures.pop_earliest();
                debug_assert_eq!(fired.map(|c| c.node), Some(event.node));
                self.cures.shift(event.delay);
                graph.set_status(event.node, HealthStatus::Susceptible);
                self.stats.cures += 1;
            }
        }
        self.now += event.delay;

        trace!(
            kind = ?event.kind,
            node = event.node.index(),
            now = self.now,
            pending_cures = self.cures.len(),
            "Applied event"
        );
        Ok(())
    }

    /// Determine and apply the next event in one go.
    ///
    /// Returns the applied event, or `None` in the absorbing state.
    pub fn step(
        &mut self,
        graph: &mut Graph,
        params: &ContagionParams,
        rng: &mut RandomStream,
    ) -> Result<Option<ScheduledEvent>, SimulationError> {
        let Some(event) = self.next_event(graph, params, rng)? else {
            return Ok(None);
        };
        self.apply(graph, event, params, rng)?;
        Ok(Some(event))
    }
}
