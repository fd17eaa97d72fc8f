//! The population: sole owner of all individuals and of the aggregate
//! counters.
//!
//! # Count invariant
//!
//! After every mutation,
//!
//! ```text
//! susceptible + infected + recovered_or_immune == total_alive
//! ```
//!
//! is re-checked; a violation is a fatal internal-consistency error carrying
//! the counts at the time of violation.  The counters are never exposed
//! mutably — [`Population::apply_event`] is the only way to change them.
//!
//! # Susceptible pool
//!
//! Contact events need a uniform draw over the currently susceptible.  The
//! pool is a `Vec<IndividualId>` with a position index, maintained with
//! swap-removes, so selection and maintenance are both O(1).  Iteration
//! order of the main map is a `BTreeMap`'s (ascending ID), which keeps
//! whole-population walks deterministic.

use std::collections::BTreeMap;

use epi_core::{IndividualId, SimRng, SimTime};
use rustc_hash::FxHashMap;

use crate::error::ModelError;
use crate::event::EventKind;
use crate::individual::{HealthState, Individual};

// ── Counts ────────────────────────────────────────────────────────────────────

/// Aggregate per-state counts over all alive individuals.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counts {
    pub susceptible: u32,
    pub infected: u32,
    pub recovered_or_immune: u32,
    pub total_alive: u32,
}

impl Counts {
    fn checked(self) -> Result<Counts, ModelError> {
        if self.susceptible + self.infected + self.recovered_or_immune != self.total_alive {
            return Err(ModelError::CountInvariant {
                susceptible: self.susceptible,
                infected: self.infected,
                recovered_or_immune: self.recovered_or_immune,
                total_alive: self.total_alive,
            });
        }
        Ok(self)
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// The mutable collection of individuals plus aggregate counters.
///
/// Dead individuals stay in the map (their IDs remain resolvable, e.g. for
/// stale-event diagnostics and ever-infected reporting) but are excluded
/// from the counters and from the susceptible pool.
#[derive(Debug, Default)]
pub struct Population {
    individuals: BTreeMap<IndividualId, Individual>,
    counts: Counts,
    susceptible_pool: Vec<IndividualId>,
    pool_index: FxHashMap<IndividualId, usize>,
    next_id: IndividualId,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(&id)
    }

    /// Total individuals ever added, dead included.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Alive individuals in ascending-ID order.
    pub fn alive(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values().filter(|ind| ind.is_alive())
    }

    /// The ID the next inserted individual must carry.
    #[inline]
    pub fn next_id(&self) -> IndividualId {
        self.next_id
    }

    /// Number of currently susceptible individuals.
    #[inline]
    pub fn susceptible_count(&self) -> u32 {
        self.counts.susceptible
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add an individual (initialization or birth) and update the counters.
    pub fn insert(&mut self, individual: Individual) -> Result<(), ModelError> {
        let id = individual.id();
        if self.individuals.contains_key(&id) {
            return Err(ModelError::DuplicateIndividual(id));
        }
        self.counts.total_alive += 1;
        match individual.health() {
            HealthState::Susceptible => {
                self.counts.susceptible += 1;
                self.pool_insert(id);
            }
            HealthState::Infected => self.counts.infected += 1,
            HealthState::Recovered | HealthState::Immune => {
                self.counts.recovered_or_immune += 1;
            }
        }
        self.individuals.insert(id, individual);
        if id >= self.next_id {
            self.next_id = id.next();
        }
        self.counts = self.counts.checked()?;
        Ok(())
    }

    /// Apply `kind` to the individual and adjust the counters atomically with
    /// the transition.  Legality is delegated to [`Individual::apply`].
    pub fn apply_event(&mut self, id: IndividualId, kind: EventKind) -> Result<(), ModelError> {
        let individual = self
            .individuals
            .get_mut(&id)
            .ok_or(ModelError::UnknownIndividual(id))?;
        let old_health = individual.health();
        individual.apply(kind)?;

        match kind {
            EventKind::Contact => {
                self.counts.susceptible -= 1;
                self.counts.infected += 1;
                self.pool_remove(id);
            }
            EventKind::Recovery => {
                self.counts.infected -= 1;
                self.counts.recovered_or_immune += 1;
            }
            // Recovered and Immune share a counter bucket.
            EventKind::ImmunizationGain => {}
            EventKind::ImmunizationLoss => {
                self.counts.recovered_or_immune -= 1;
                self.counts.susceptible += 1;
                self.pool_insert(id);
            }
            EventKind::Death => {
                self.counts.total_alive -= 1;
                match old_health {
                    HealthState::Susceptible => {
                        self.counts.susceptible -= 1;
                        self.pool_remove(id);
                    }
                    HealthState::Infected => self.counts.infected -= 1,
                    HealthState::Recovered | HealthState::Immune => {
                        self.counts.recovered_or_immune -= 1;
                    }
                }
            }
            EventKind::Birth => {}
        }

        self.counts = self.counts.checked()?;
        Ok(())
    }

    /// Mutable access for the scheduler to stamp the immunity expiry when
    /// immunity is granted.  State transitions still go through
    /// [`Population::apply_event`] only.
    pub fn set_immunity_expiry(
        &mut self,
        id: IndividualId,
        expires_at: Option<SimTime>,
    ) -> Result<(), ModelError> {
        let individual = self
            .individuals
            .get_mut(&id)
            .ok_or(ModelError::UnknownIndividual(id))?;
        individual.set_immunity_expiry(expires_at);
        Ok(())
    }

    // ── Contact-target selection ──────────────────────────────────────────

    /// Uniform draw over the currently susceptible individuals, or `None` if
    /// there are none.
    pub fn choose_susceptible(&self, rng: &mut SimRng) -> Option<IndividualId> {
        if self.susceptible_pool.is_empty() {
            return None;
        }
        let i = rng.gen_range(0..self.susceptible_pool.len());
        Some(self.susceptible_pool[i])
    }

    // ── Pool maintenance ──────────────────────────────────────────────────

    fn pool_insert(&mut self, id: IndividualId) {
        self.pool_index.insert(id, self.susceptible_pool.len());
        self.susceptible_pool.push(id);
    }

    fn pool_remove(&mut self, id: IndividualId) {
        let Some(i) = self.pool_index.remove(&id) else {
            return;
        };
        self.susceptible_pool.swap_remove(i);
        if i < self.susceptible_pool.len() {
            let moved = self.susceptible_pool[i];
            self.pool_index.insert(moved, i);
        }
    }
}
