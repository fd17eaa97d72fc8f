//! Strongly typed identifier for individuals.
//!
//! `IndividualId` is `Copy + Ord + Hash` so it can be used as a map key, a
//! heap tie-breaker, and a sorted-collection element without ceremony.  IDs
//! are assigned sequentially at population construction and by births; an ID
//! is never reused, even after the individual dies.

use std::fmt;

/// Stable, unique identifier of one member of the population.
///
/// The inner integer is `pub` for cheap construction in tests; production
/// code obtains IDs from the population, never by arithmetic.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndividualId(pub u32);

impl IndividualId {
    /// The ID following this one, used when allocating newborns.
    #[inline]
    pub fn next(self) -> IndividualId {
        IndividualId(self.0 + 1)
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Individual({})", self.0)
    }
}

impl From<IndividualId> for usize {
    #[inline]
    fn from(id: IndividualId) -> usize {
        id.0 as usize
    }
}
