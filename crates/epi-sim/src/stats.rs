//! End-of-run statistics.

use epi_core::SimTime;
use epi_model::{Counts, EventKind};

/// Counters accumulated over one run, for end-of-run reporting.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    pub infections: u64,
    pub recoveries: u64,
    pub deaths: u64,
    pub births: u64,
    pub immunization_gains: u64,
    pub immunization_losses: u64,

    /// Committed events (each produced one trace record).
    pub events_applied: u64,
    /// Stale events discarded without effect.
    pub events_discarded: u64,

    /// Simulated time of the last committed event (0 if none).
    pub final_time: SimTime,
    /// Aggregate counts at the end of the run.
    pub final_counts: Counts,
}

impl RunStats {
    pub(crate) fn record_applied(&mut self, kind: EventKind) {
        self.events_applied += 1;
        match kind {
            EventKind::Contact => self.infections += 1,
            EventKind::Recovery => self.recoveries += 1,
            EventKind::Death => self.deaths += 1,
            EventKind::ImmunizationGain => self.immunization_gains += 1,
            EventKind::ImmunizationLoss => self.immunization_losses += 1,
            EventKind::Birth => self.births += 1,
        }
    }
}
