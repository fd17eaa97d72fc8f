//! `epi-output` — external collaborators that consume a finished run.
//!
//! Nothing here participates in scheduling or state transitions: the sole
//! data contract with the engine is the `SimulationTrace` (plus `RunStats`
//! for the summary).
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`writer`]   | `TraceWriter` trait                                    |
//! | [`csv`]      | `CsvTraceWriter`                                       |
//! | [`observer`] | `TraceObserver<W>` — streams records as events commit  |
//! | [`summary`]  | end-of-run text report                                 |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                       |

pub mod csv;
pub mod error;
pub mod observer;
pub mod summary;
pub mod writer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use writer::TraceWriter;
