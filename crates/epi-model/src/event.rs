//! The closed event vocabulary and the timeline event value.

use std::fmt;

use epi_core::{IndividualId, SimTime};

// ── EventKind ─────────────────────────────────────────────────────────────────

/// The six event classes the engine can schedule.
///
/// The enum is closed on purpose: eligibility computation and event dispatch
/// are exhaustive `match`es, so adding a kind is a compile-time-visible
/// change everywhere it matters.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EventKind {
    /// An infected individual's transmitting contact; the susceptible target
    /// is chosen uniformly when the event fires.
    Contact = 0,
    /// An infection resolves in recovery.
    Recovery = 1,
    /// Death, natural or caused by the infection.  Terminal.
    Death = 2,
    /// A recovered individual's immunity takes hold.
    ImmunizationGain = 3,
    /// Temporary immunity wears off.
    ImmunizationLoss = 4,
    /// The subject parents a newborn individual.
    Birth = 5,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Contact,
        EventKind::Recovery,
        EventKind::Death,
        EventKind::ImmunizationGain,
        EventKind::ImmunizationLoss,
        EventKind::Birth,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Contact => "contact",
            EventKind::Recovery => "recovery",
            EventKind::Death => "death",
            EventKind::ImmunizationGain => "immunization-gain",
            EventKind::ImmunizationLoss => "immunization-loss",
            EventKind::Birth => "birth",
        };
        f.write_str(name)
    }
}

// ── EligibleEvents ────────────────────────────────────────────────────────────

/// A compact set over [`EventKind`], one bit per kind.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct EligibleEvents(u8);

impl EligibleEvents {
    pub const EMPTY: EligibleEvents = EligibleEvents(0);

    pub fn of(kinds: &[EventKind]) -> Self {
        let mut set = EligibleEvents(0);
        for &kind in kinds {
            set.insert(kind);
        }
        set
    }

    #[inline]
    pub fn insert(&mut self, kind: EventKind) {
        self.0 |= 1 << kind as u8;
    }

    #[inline]
    pub fn contains(self, kind: EventKind) -> bool {
        self.0 & (1 << kind as u8) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained kinds in declaration order.
    pub fn iter(self) -> impl Iterator<Item = EventKind> {
        EventKind::ALL.into_iter().filter(move |&k| self.contains(k))
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One pending entry on the simulation timeline.
///
/// `subject` is the individual whose exponential clock produced the event.
/// For `Contact` the infection target is chosen uniformly among the currently
/// susceptible when the event fires; for `Birth` the newborn does not exist
/// until the event fires.  `seq` is the scheduler's per-subject generation
/// counter: an event whose `seq` no longer matches the subject's current
/// generation has been superseded and is discarded as stale.
///
/// Ordering is derived field-by-field — `(time, subject, seq, kind)` — which
/// gives the deterministic ascending-identifier tie-break for simultaneous
/// times required for reproducible runs.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Event {
    pub time: SimTime,
    pub subject: IndividualId,
    pub seq: u64,
    pub kind: EventKind,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} for {}", self.time, self.kind, self.subject)
    }
}
