//! The event timeline: a min-priority queue of pending events with lazy
//! stale-event invalidation.
//!
//! # Competing exponential clocks
//!
//! For each individual, every currently eligible event kind is an independent
//! Poisson process.  The minimum of independent exponentials is itself
//! exponential, so instead of queueing one pending event per kind the
//! scheduler samples a candidate time per kind and retains only the earliest
//! as the individual's single pending event.  Whenever an individual's
//! eligibility set changes, `schedule_next` runs again and the previous
//! pending event is superseded.
//!
//! # Stale invalidation
//!
//! Superseded entries are not removed from the heap (lazy deletion).  Each
//! push bumps the subject's generation counter and stamps it on the event;
//! on pop, an event is discarded without effect when its subject is dead,
//! its generation is stale, or its kind is no longer eligible.  Discards are
//! the expected, non-error path and are reported distinctly from failures
//! (debug log + [`SimObserver::on_discard`]).
//!
//! # Ordering
//!
//! The heap is keyed by `(time, subject, seq)`; simultaneous times — measure
//! zero under continuous sampling, but constructible — resolve by ascending
//! identifier, so runs are reproducible event for event.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use epi_core::{EpidemicConfig, IndividualId, RateClock, RateError, SimRng, SimTime};
use epi_model::{Event, EventKind, HealthState, Individual, ModelError, Population};
use rustc_hash::FxHashMap;

use crate::error::SimResult;
use crate::observer::{DiscardReason, SimObserver};

// ── Derived rates ─────────────────────────────────────────────────────────────

/// Per-kind instantaneous rates and outcome probabilities derived from the
/// run configuration.
///
/// Two standard Poisson-process reductions happen here rather than in the
/// event loop:
///
/// - **Thinning**: only transmitting contacts matter, so the contact clock
///   runs at `contact_rate × infection_probability` and every fired contact
///   infects (provided a susceptible target exists).
/// - **Splitting**: the infection-resolution clock at `recovery_rate` splits
///   into a recovery clock at `recovery_rate × (1 − p_death)` and an extra
///   death-rate component `recovery_rate × p_death` on top of the natural
///   death rate.
#[derive(Clone, Debug)]
pub(crate) struct ModelParams {
    contact_transmission: f64,
    recovery: f64,
    death_baseline: f64,
    death_infected_extra: f64,
    birth: f64,
    immunization_after_recovery: f64,
    vertical_immunization: f64,
    immunity_loss_rate: Option<f64>,
}

impl ModelParams {
    pub(crate) fn from_config(config: &EpidemicConfig) -> Self {
        Self {
            contact_transmission: config.contact_rate * config.infection_probability,
            recovery: config.recovery_rate * (1.0 - config.death_on_infection_probability),
            death_baseline: config.natural_death_rate,
            death_infected_extra: config.recovery_rate * config.death_on_infection_probability,
            birth: config.birth_rate,
            immunization_after_recovery: config.immunization_after_recovery_probability,
            vertical_immunization: config.vertical_immunization_probability,
            immunity_loss_rate: config.immunization.loss_rate(),
        }
    }

    fn rate_for(&self, kind: EventKind, health: HealthState) -> f64 {
        match kind {
            EventKind::Contact => self.contact_transmission,
            EventKind::Recovery => self.recovery,
            EventKind::Death => {
                let extra = if health == HealthState::Infected {
                    self.death_infected_extra
                } else {
                    0.0
                };
                self.death_baseline + extra
            }
            EventKind::Birth => self.birth,
            // Pushed explicitly at recovery time, never rate-sampled.
            EventKind::ImmunizationGain => 0.0,
            // Uses the stored absolute expiry, never rate-sampled here.
            EventKind::ImmunizationLoss => 0.0,
        }
    }
}

// ── EventScheduler ────────────────────────────────────────────────────────────

/// Maintains the globally time-ordered pending-event timeline and advances
/// simulated time monotonically.
#[derive(Debug)]
pub struct EventScheduler {
    pub(crate) queue: BinaryHeap<Reverse<Event>>,
    /// Current generation per individual; an event with an older `seq` has
    /// been superseded.
    pub(crate) generations: FxHashMap<IndividualId, u64>,
    pub(crate) now: SimTime,
    horizon: SimTime,
    clock: RateClock,
    params: ModelParams,
    discarded: u64,
}

impl EventScheduler {
    pub fn new(config: &EpidemicConfig) -> Self {
        Self {
            queue: BinaryHeap::new(),
            generations: FxHashMap::default(),
            now: SimTime::ZERO,
            horizon: SimTime(config.horizon),
            clock: RateClock,
            params: ModelParams::from_config(config),
            discarded: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Current simulated time (the time of the last popped event).
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Stale events discarded so far.
    #[inline]
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Pending timeline entries, superseded ones included.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Sample a candidate time for every event kind the individual is
    /// eligible for, retain only the earliest, and queue it as the
    /// individual's next pending event.
    ///
    /// Kinds whose derived rate is non-positive never fire and are skipped;
    /// an individual with no schedulable kind gets no pending event and stays
    /// passive until another event changes its eligibility.
    pub fn schedule_next(&mut self, individual: &Individual, rng: &mut SimRng) {
        let mut best: Option<(SimTime, EventKind)> = None;
        for kind in individual.eligible_events().iter() {
            let candidate = if kind == EventKind::ImmunizationLoss {
                // The expiry was sampled once when immunity was granted.
                individual.immunity_expires_at()
            } else {
                let rate = self.params.rate_for(kind, individual.health());
                match self.clock.sample(rate, rng) {
                    Ok(wait) => Some(self.now.after(wait)),
                    Err(RateError::InvalidRate { .. }) => None,
                }
            };
            let Some(time) = candidate else { continue };
            if best.is_none_or(|(t, _)| time < t) {
                best = Some((time, kind));
            }
        }
        let Some((time, kind)) = best else { return };
        let seq = self.bump_generation(individual.id());
        log::trace!("scheduled {kind} for {} at {time}", individual.id());
        self.queue.push(Reverse(Event {
            time,
            subject: individual.id(),
            seq,
            kind,
        }));
    }

    // ── Time advance ──────────────────────────────────────────────────────

    /// Pop and apply the globally earliest valid pending event.
    ///
    /// Returns `Ok(None)` when the timeline is exhausted or the earliest
    /// pending time exceeds the horizon (both normal termination).  Stale
    /// entries are discarded and the next earliest tried.  After a valid
    /// event is applied, every individual whose eligibility set changed is
    /// rescheduled.
    pub fn step<O: SimObserver>(
        &mut self,
        population: &mut Population,
        rng: &mut SimRng,
        observer: &mut O,
    ) -> SimResult<Option<Event>> {
        loop {
            let Some(&Reverse(event)) = self.queue.peek() else {
                return Ok(None);
            };
            if event.time > self.horizon {
                return Ok(None);
            }
            self.queue.pop();
            debug_assert!(event.time >= self.now, "timeline must advance monotonically");
            self.now = event.time;

            // ── Stale-event invalidation ──────────────────────────────────
            {
                let subject = population
                    .get(event.subject)
                    .ok_or(ModelError::UnknownIndividual(event.subject))?;
                if !subject.is_alive() {
                    self.discard(&event, DiscardReason::SubjectDead, observer);
                    continue;
                }
                if self.generation(event.subject) != event.seq {
                    self.discard(&event, DiscardReason::Superseded, observer);
                    continue;
                }
                if !subject.eligible_events().contains(event.kind) {
                    self.discard(&event, DiscardReason::NoLongerEligible, observer);
                    continue;
                }
            }

            // ── Apply ─────────────────────────────────────────────────────
            match event.kind {
                EventKind::Contact => {
                    let Some(target) = population.choose_susceptible(rng) else {
                        // Nobody left to infect right now; re-arm the clock.
                        self.discard(&event, DiscardReason::NoSusceptibleTarget, observer);
                        self.reschedule(event.subject, population, rng)?;
                        continue;
                    };
                    population.apply_event(target, EventKind::Contact)?;
                    self.reschedule(event.subject, population, rng)?;
                    self.reschedule(target, population, rng)?;
                }

                EventKind::Recovery => {
                    population.apply_event(event.subject, EventKind::Recovery)?;
                    if rng.gen_bool(self.params.immunization_after_recovery) {
                        // Immunity takes hold at the recovery instant; queue
                        // it as a real timeline event rather than folding it
                        // into the recovery.
                        self.push_immediate(event.subject, EventKind::ImmunizationGain);
                    } else {
                        self.reschedule(event.subject, population, rng)?;
                    }
                }

                EventKind::ImmunizationGain => {
                    population.apply_event(event.subject, EventKind::ImmunizationGain)?;
                    let expires_at = self.sample_immunity_expiry(rng);
                    population.set_immunity_expiry(event.subject, expires_at)?;
                    self.reschedule(event.subject, population, rng)?;
                }

                EventKind::ImmunizationLoss => {
                    population.apply_event(event.subject, EventKind::ImmunizationLoss)?;
                    self.reschedule(event.subject, population, rng)?;
                }

                EventKind::Death => {
                    population.apply_event(event.subject, EventKind::Death)?;
                    // Dead individuals are never rescheduled; any remaining
                    // queue entries for them are discarded as stale.
                }

                EventKind::Birth => {
                    // Legality check on the parent; the parent is unchanged.
                    population.apply_event(event.subject, EventKind::Birth)?;
                    let immune = rng.gen_bool(self.params.vertical_immunization);
                    let newborn_id = population.next_id();
                    let mut newborn = Individual::newborn(newborn_id, immune);
                    if immune {
                        newborn.set_immunity_expiry(self.sample_immunity_expiry(rng));
                    }
                    population.insert(newborn)?;
                    self.reschedule(event.subject, population, rng)?;
                    self.reschedule(newborn_id, population, rng)?;
                }
            }

            log::trace!("applied {event}");
            return Ok(Some(event));
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Re-sample the pending event for an individual already in the
    /// population.
    fn reschedule(
        &mut self,
        id: IndividualId,
        population: &Population,
        rng: &mut SimRng,
    ) -> SimResult<()> {
        let individual = population
            .get(id)
            .ok_or(ModelError::UnknownIndividual(id))?;
        self.schedule_next(individual, rng);
        Ok(())
    }

    /// Queue `kind` for `subject` at the current instant, superseding the
    /// subject's previous pending event.
    fn push_immediate(&mut self, subject: IndividualId, kind: EventKind) {
        let seq = self.bump_generation(subject);
        self.queue.push(Reverse(Event {
            time: self.now,
            subject,
            seq,
            kind,
        }));
    }

    /// Absolute time at which freshly granted immunity wears off; `None`
    /// under permanent immunization.
    pub(crate) fn sample_immunity_expiry(&self, rng: &mut SimRng) -> Option<SimTime> {
        self.params
            .immunity_loss_rate
            .and_then(|rate| self.clock.sample(rate, rng).ok())
            .map(|wait| self.now.after(wait))
    }

    fn discard<O: SimObserver>(&mut self, event: &Event, reason: DiscardReason, observer: &mut O) {
        self.discarded += 1;
        log::debug!("discarded stale {event}: {reason}");
        observer.on_discard(event, reason);
    }

    fn generation(&self, id: IndividualId) -> u64 {
        self.generations.get(&id).copied().unwrap_or(0)
    }

    fn bump_generation(&mut self, id: IndividualId) -> u64 {
        let seq = self.generations.entry(id).or_insert(0);
        *seq += 1;
        *seq
    }
}
