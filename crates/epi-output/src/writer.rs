//! The backend-agnostic trace sink.

use epi_sim::{SimulationTrace, TraceRecord};

use crate::error::OutputResult;

/// Writes trace records to some persistent backend.
///
/// Implementations must tolerate `finish` being called more than once.
pub trait TraceWriter {
    fn write_record(&mut self, record: &TraceRecord) -> OutputResult<()>;

    /// Flush and close the backend.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write an entire finished trace.
    fn write_trace(&mut self, trace: &SimulationTrace) -> OutputResult<()> {
        for record in trace.records() {
            self.write_record(record)?;
        }
        self.finish()
    }
}
