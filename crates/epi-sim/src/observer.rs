//! Run observer trait for progress reporting and diagnostics.

use epi_model::{Counts, Event};

use crate::stats::RunStats;

/// Why a popped event was discarded instead of applied.
///
/// Discards are the expected, non-error path for pending events whose subject
/// moved on before they fired; the reason keeps them distinguishable from
/// true errors in diagnostics.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DiscardReason {
    /// The subject died before the event fired.
    SubjectDead,
    /// The subject was rescheduled after this event was queued; a newer
    /// pending event supersedes it.
    Superseded,
    /// The subject's state no longer admits this event kind.
    NoLongerEligible,
    /// A transmitting contact fired with zero susceptible individuals left;
    /// the subject's contact clock is re-armed.
    NoSusceptibleTarget,
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiscardReason::SubjectDead => "subject dead",
            DiscardReason::Superseded => "superseded",
            DiscardReason::NoLongerEligible => "no longer eligible",
            DiscardReason::NoSusceptibleTarget => "no susceptible target",
        };
        f.write_str(name)
    }
}

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] as the
/// timeline advances.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called after every committed event, with the aggregate counts as of
    /// `event.time`.
    fn on_event(&mut self, _event: &Event, _counts: Counts) {}

    /// Called for every stale event discarded without effect.
    fn on_discard(&mut self, _event: &Event, _reason: DiscardReason) {}

    /// Called once when the run terminates (horizon reached, timeline empty,
    /// or early extinction stop).
    fn on_run_end(&mut self, _stats: &RunStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
