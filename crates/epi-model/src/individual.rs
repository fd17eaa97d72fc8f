//! One member of the population and its legal state transitions.

use std::fmt;

use epi_core::{IndividualId, SimTime};

use crate::error::ModelError;
use crate::event::{EligibleEvents, EventKind};

// ── HealthState ───────────────────────────────────────────────────────────────

/// Epidemiological state — exactly one active at a time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    Susceptible,
    Infected,
    Recovered,
    Immune,
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Infected => "infected",
            HealthState::Recovered => "recovered",
            HealthState::Immune => "immune",
        };
        f.write_str(name)
    }
}

// ── VitalStatus ───────────────────────────────────────────────────────────────

/// Alive or Dead.  Dead is terminal: the individual is excluded from all
/// further event consideration and from the aggregate counters.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VitalStatus {
    Alive,
    Dead,
}

// ── Individual ────────────────────────────────────────────────────────────────

/// The finite-state entity representing one member of the population.
///
/// State machine (all transitions driven by scheduler events):
///
/// ```text
/// Susceptible --Contact-----------> Infected
/// Infected    --Recovery----------> Recovered
/// Recovered   --ImmunizationGain--> Immune
/// Immune      --ImmunizationLoss--> Susceptible   (temporary immunity only)
/// any alive   --Death-------------> Dead          (terminal)
/// ```
///
/// `Birth` is legal for any alive subject and leaves the subject unchanged;
/// the newborn is created by the scheduler when the event fires.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    id: IndividualId,
    health: HealthState,
    vital: VitalStatus,
    /// Absolute time at which current immunity wears off.  Present iff the
    /// individual is Immune under temporary immunization.
    immunity_expires_at: Option<SimTime>,
    /// Immunity inherited at birth ("vertical" immunization).  Set at
    /// creation, never mutated.
    born_immune: bool,
}

impl Individual {
    /// An initial-population individual in the given state.
    pub fn new(id: IndividualId, health: HealthState) -> Self {
        Self {
            id,
            health,
            vital: VitalStatus::Alive,
            immunity_expires_at: None,
            born_immune: false,
        }
    }

    /// A newborn: Susceptible, or Immune when vertical immunization fired.
    pub fn newborn(id: IndividualId, immune: bool) -> Self {
        Self {
            id,
            health: if immune {
                HealthState::Immune
            } else {
                HealthState::Susceptible
            },
            vital: VitalStatus::Alive,
            immunity_expires_at: None,
            born_immune: immune,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> IndividualId {
        self.id
    }

    #[inline]
    pub fn health(&self) -> HealthState {
        self.health
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.vital == VitalStatus::Alive
    }

    #[inline]
    pub fn immunity_expires_at(&self) -> Option<SimTime> {
        self.immunity_expires_at
    }

    #[inline]
    pub fn born_immune(&self) -> bool {
        self.born_immune
    }

    /// Record when the current immunity wears off.  Called by the scheduler
    /// exactly when immunity is granted (ImmunizationGain, immune initials,
    /// immune newborns) under temporary immunization; `None` under permanent.
    pub fn set_immunity_expiry(&mut self, expires_at: Option<SimTime>) {
        self.immunity_expires_at = expires_at;
    }

    // ── Eligibility ───────────────────────────────────────────────────────

    /// The event kinds this individual's state currently admits.
    ///
    /// Kinds whose configured rate is zero drop out at sampling time (the
    /// rate clock refuses non-positive rates); eligibility is purely a
    /// function of state.
    pub fn eligible_events(&self) -> EligibleEvents {
        if !self.is_alive() {
            return EligibleEvents::EMPTY;
        }
        let mut set = EligibleEvents::of(&[EventKind::Death, EventKind::Birth]);
        match self.health {
            HealthState::Susceptible => {}
            HealthState::Infected => {
                set.insert(EventKind::Contact);
                set.insert(EventKind::Recovery);
            }
            HealthState::Recovered => {
                set.insert(EventKind::ImmunizationGain);
            }
            HealthState::Immune => {
                if self.immunity_expires_at.is_some() {
                    set.insert(EventKind::ImmunizationLoss);
                }
            }
        }
        set
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Apply an event to this individual.
    ///
    /// `Contact` is the one asymmetric kind: the clock runs on an Infected
    /// subject, but the state change lands on the Susceptible target, so its
    /// legality is checked against the target's state rather than the
    /// subject eligibility set.  The scheduler never requests an ineligible
    /// transition; a failure here indicates an internal scheduling defect
    /// (fatal, never expected in correct operation).
    pub fn apply(&mut self, kind: EventKind) -> Result<(), ModelError> {
        let legal = if kind == EventKind::Contact {
            self.is_alive() && self.health == HealthState::Susceptible
        } else {
            self.eligible_events().contains(kind)
        };
        if !legal {
            return Err(ModelError::IllegalTransition {
                id: self.id,
                state: self.health,
                kind,
            });
        }
        match kind {
            EventKind::Contact => self.health = HealthState::Infected,
            EventKind::Recovery => self.health = HealthState::Recovered,
            EventKind::ImmunizationGain => self.health = HealthState::Immune,
            EventKind::ImmunizationLoss => {
                self.health = HealthState::Susceptible;
                self.immunity_expires_at = None;
            }
            EventKind::Death => self.vital = VitalStatus::Dead,
            // The newborn is created by the scheduler; the parent is unchanged.
            EventKind::Birth => {}
        }
        Ok(())
    }
}
