//! The time-indexed sequence of aggregate snapshots a run produces.

use epi_core::SimTime;
use epi_model::Counts;

/// One aggregate snapshot: the population counts as of `time`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceRecord {
    pub time: SimTime,
    pub susceptible: u32,
    pub infected: u32,
    pub recovered_or_immune: u32,
    pub total_alive: u32,
}

impl TraceRecord {
    pub fn new(time: SimTime, counts: Counts) -> Self {
        Self {
            time,
            susceptible: counts.susceptible,
            infected: counts.infected,
            recovered_or_immune: counts.recovered_or_immune,
            total_alive: counts.total_alive,
        }
    }
}

/// Ordered, append-only sequence of [`TraceRecord`]s: one at t = 0, then one
/// per committed event.  Read-only once handed to output collaborators.
#[derive(Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationTrace {
    records: Vec<TraceRecord>,
}

impl SimulationTrace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: TraceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
