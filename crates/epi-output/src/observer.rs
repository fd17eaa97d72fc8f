//! `TraceObserver<W>` — bridges `SimObserver` to a `TraceWriter`.

use epi_core::SimTime;
use epi_model::{Counts, Event};
use epi_sim::{RunStats, SimObserver, TraceRecord};

use crate::error::{OutputError, OutputResult};
use crate::writer::TraceWriter;

/// A [`SimObserver`] that streams one row per committed event to any
/// [`TraceWriter`] backend, instead of buffering the whole trace in memory.
///
/// Errors from the writer are stored internally because observer callbacks
/// have no return value; after the run, check with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    /// Create an observer backed by `writer` and write the t = 0 snapshot,
    /// which `on_event` never sees.
    pub fn new(mut writer: W, initial_counts: Counts) -> OutputResult<Self> {
        writer.write_record(&TraceRecord::new(SimTime::ZERO, initial_counts))?;
        Ok(Self {
            writer,
            last_error: None,
        })
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> SimObserver for TraceObserver<W> {
    fn on_event(&mut self, event: &Event, counts: Counts) {
        let result = self.writer.write_record(&TraceRecord::new(event.time, counts));
        self.store_err(result);
    }

    fn on_run_end(&mut self, _stats: &RunStats) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
