//! Event-driven SIS contagion simulation.
//!
//! A trial runs a continuous-time susceptible-infected-susceptible process
//! on a contact graph. Given the same seed, it produces identical results
//! every run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     TrialRunner                         │
//! │     owns the time loop, censors events past horizon     │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │  EventScheduler                                    │ │
//! │  │  min(fresh infection draws) vs earliest cure       │ │
//! │  └───────────────┬────────────────────┬───────────────┘ │
//! │                  │                    │                 │
//! │                  ▼                    ▼                 │
//! │  ┌───────────────────────┐  ┌─────────────────────────┐ │
//! │  │  susceptible_hazards  │  │  PendingCures           │ │
//! │  │  C/N + gamma*weight   │  │  ordered by remaining   │ │
//! │  └───────────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod cures;
mod error;
mod hazard;
mod params;
mod rng;
mod scheduler;
mod trial;

pub use cures::{PendingCure, PendingCures};
pub use error::SimulationError;
pub use hazard::{susceptible_hazards, Hazard};
pub use params::{ContagionParams, HazardMode};
pub use rng::RandomStream;
pub use scheduler::{EventKind, EventScheduler, ScheduledEvent, SchedulerStats};
pub use trial::{TrialEnd, TrialOutcome, TrialRunner, DEFAULT_HORIZON_FACTOR};
