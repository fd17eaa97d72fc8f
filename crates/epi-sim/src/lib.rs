//! `epi-sim` — the discrete-event engine: event timeline and run loop.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`scheduler`] | `EventScheduler` (min-heap timeline, stale invalidation)|
//! | [`sim`]       | `Simulation` (config → finished trace)                  |
//! | [`trace`]     | `SimulationTrace`, `TraceRecord`                        |
//! | [`stats`]     | `RunStats`                                              |
//! | [`observer`]  | `SimObserver` trait, `NoopObserver`, `DiscardReason`    |
//! | [`error`]     | `SimError`, `SimResult<T>`                              |
//!
//! # Event loop (summary)
//!
//! ```text
//! Simulation::new(config):
//!   validate config; build population; seed RNG;
//!   schedule the first event for every individual
//! Simulation::run(observer):
//!   record the t=0 snapshot
//!   while let Some(event) = scheduler.step(population, rng, observer):
//!     append a snapshot of the aggregate counts at event.time
//! ```
//!
//! Each `step` pops the globally earliest pending event, silently discarding
//! stale entries (dead subject, superseded generation, vanished eligibility,
//! or a contact with nobody left to infect) until a valid one applies or the
//! timeline runs past the horizon.  The engine is strictly sequential: one
//! logical clock, one writer.  Parallelism is only ever safe across whole
//! independent `Simulation` instances.

pub mod error;
pub mod observer;
pub mod scheduler;
pub mod sim;
pub mod stats;
pub mod trace;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use observer::{DiscardReason, NoopObserver, SimObserver};
pub use scheduler::EventScheduler;
pub use sim::Simulation;
pub use stats::RunStats;
pub use trace::{SimulationTrace, TraceRecord};
