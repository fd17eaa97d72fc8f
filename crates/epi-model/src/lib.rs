//! `epi-model` — the epidemiological state model.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`event`]      | `EventKind`, `Event`, `EligibleEvents`                |
//! | [`individual`] | `Individual`, `HealthState`, `VitalStatus`            |
//! | [`population`] | `Population`, `Counts`                                |
//! | [`error`]      | `ModelError`, `ModelResult<T>`                        |
//!
//! # Ownership
//!
//! `Population` exclusively owns every `Individual`; state and vital status
//! change only through [`Population::apply_event`], which keeps the four
//! aggregate counters exactly consistent with the sum of per-individual
//! states.  The scheduler in `epi-sim` is the only caller.

pub mod error;
pub mod event;
pub mod individual;
pub mod population;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ModelError, ModelResult};
pub use event::{EligibleEvents, Event, EventKind};
pub use individual::{HealthState, Individual, VitalStatus};
pub use population::{Counts, Population};
