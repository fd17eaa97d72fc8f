//! CSV output backend.
//!
//! Creates `trace.csv` in the configured output directory, one row per trace
//! record.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use epi_sim::TraceRecord;

use crate::error::OutputResult;
use crate::writer::TraceWriter;

/// Writes the aggregate-count trace to a CSV file.
pub struct CsvTraceWriter {
    records: Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Open (or create) `trace.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut records = Writer::from_path(dir.join("trace.csv"))?;
        records.write_record([
            "time",
            "susceptible",
            "infected",
            "recovered_or_immune",
            "total_alive",
        ])?;
        Ok(Self {
            records,
            finished: false,
        })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_record(&mut self, record: &TraceRecord) -> OutputResult<()> {
        self.records.write_record(&[
            record.time.0.to_string(),
            record.susceptible.to_string(),
            record.infected.to_string(),
            record.recovered_or_immune.to_string(),
            record.total_alive.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.records.flush()?;
        Ok(())
    }
}
