//! Model error type.

use epi_core::IndividualId;
use thiserror::Error;

use crate::event::EventKind;
use crate::individual::HealthState;

/// Internal-consistency failures of the state model.
///
/// Every variant indicates a programming defect in the scheduling layer, not
/// a recoverable runtime condition; callers abort the run and surface the
/// diagnostic state.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("event `{kind}` applied to {id} in state `{state}` which is not eligible for it")]
    IllegalTransition {
        id: IndividualId,
        state: HealthState,
        kind: EventKind,
    },

    #[error("{0} is not in the population")]
    UnknownIndividual(IndividualId),

    #[error("{0} is already in the population")]
    DuplicateIndividual(IndividualId),

    #[error(
        "aggregate counters inconsistent: susceptible={susceptible} + infected={infected} \
         + recovered_or_immune={recovered_or_immune} != total_alive={total_alive}"
    )]
    CountInvariant {
        susceptible: u32,
        infected: u32,
        recovered_or_immune: u32,
        total_alive: u32,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
