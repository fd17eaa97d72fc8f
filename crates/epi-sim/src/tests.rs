//! Integration tests for the event engine.

use epi_core::{EpidemicConfig, Immunization, IndividualId, SimRng, SimTime};
use epi_model::{Counts, Event, EventKind};

use crate::observer::{DiscardReason, NoopObserver, SimObserver};
use crate::sim::Simulation;
use crate::stats::RunStats;
use crate::trace::SimulationTrace;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Baseline SIR with permanent immunization, no vital dynamics (the original
/// package's canonical scenario, scaled down).
fn base_config() -> EpidemicConfig {
    EpidemicConfig {
        initial_susceptible: 90,
        initial_infected: 10,
        initial_immune: 0,
        infection_probability: 0.03,
        death_on_infection_probability: 0.0,
        immunization_after_recovery_probability: 1.0,
        vertical_immunization_probability: 0.0,
        contact_rate: 1.0,
        recovery_rate: 0.03,
        birth_rate: 0.0,
        natural_death_rate: 0.0,
        immunization: Immunization::Permanent,
        horizon: 2000.0,
        seed: 42,
        stop_on_extinction: false,
    }
}

fn run(config: EpidemicConfig) -> (SimulationTrace, RunStats) {
    let mut sim = Simulation::new(config).unwrap();
    let trace = sim.run(&mut NoopObserver).unwrap();
    (trace, sim.stats().clone())
}

/// Observer that records everything it is told.
#[derive(Default)]
struct Collecting {
    events: Vec<(Event, Counts)>,
    discards: Vec<(Event, DiscardReason)>,
    end_stats: Option<RunStats>,
}

impl SimObserver for Collecting {
    fn on_event(&mut self, event: &Event, counts: Counts) {
        self.events.push((*event, counts));
    }
    fn on_discard(&mut self, event: &Event, reason: DiscardReason) {
        self.discards.push((*event, reason));
    }
    fn on_run_end(&mut self, stats: &RunStats) {
        self.end_stats = Some(stats.clone());
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;
    use crate::error::SimError;
    use epi_core::ConfigError;

    #[test]
    fn invalid_config_fails_before_any_scheduling() {
        let mut cfg = base_config();
        cfg.infection_probability = 2.0;
        let err = Simulation::new(cfg).unwrap_err();
        assert_eq!(
            err,
            SimError::Config(ConfigError::Probability {
                name: "infection_probability",
                value: 2.0,
            })
        );
    }

    #[test]
    fn initial_counts_match_config() {
        let mut cfg = base_config();
        cfg.initial_immune = 5;
        let sim = Simulation::new(cfg).unwrap();
        let c = sim.population.counts();
        assert_eq!(c.susceptible, 90);
        assert_eq!(c.infected, 10);
        assert_eq!(c.recovered_or_immune, 5);
        assert_eq!(c.total_alive, 105);
    }

    #[test]
    fn initial_immunes_get_expiry_under_temporary_immunization() {
        let mut cfg = base_config();
        cfg.initial_immune = 3;
        cfg.immunization = Immunization::Temporary { loss_rate: 0.01 };
        let sim = Simulation::new(cfg).unwrap();
        let with_expiry = sim
            .population
            .alive()
            .filter(|ind| ind.immunity_expires_at().is_some())
            .count();
        assert_eq!(with_expiry, 3);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn zero_horizon_yields_only_the_initial_snapshot() {
        let mut cfg = base_config();
        cfg.initial_susceptible = 99;
        cfg.initial_infected = 1;
        cfg.horizon = 0.0;
        let (trace, stats) = run(cfg);

        assert_eq!(trace.len(), 1);
        let first = trace.records()[0];
        assert_eq!(first.time, SimTime::ZERO);
        assert_eq!(first.susceptible, 99);
        assert_eq!(first.infected, 1);
        assert_eq!(first.recovered_or_immune, 0);
        assert_eq!(stats.events_applied, 0);
    }

    #[test]
    fn no_infected_means_no_contacts_ever() {
        let mut cfg = base_config();
        cfg.initial_susceptible = 100;
        cfg.initial_infected = 0;
        cfg.contact_rate = 10.0;
        cfg.infection_probability = 1.0;
        cfg.horizon = 100_000.0;
        let (trace, stats) = run(cfg);

        assert_eq!(stats.infections, 0);
        for record in trace.records() {
            assert_eq!(record.susceptible, 100);
            assert_eq!(record.infected, 0);
        }
    }

    #[test]
    fn permanent_immunization_is_never_lost() {
        let mut cfg = base_config();
        cfg.horizon = 50_000.0; // long enough for the outbreak to fully resolve
        let mut obs = Collecting::default();
        let mut sim = Simulation::new(cfg).unwrap();
        sim.run(&mut obs).unwrap();

        assert!(sim.stats().immunization_gains > 0, "outbreak never resolved");
        assert_eq!(sim.stats().immunization_losses, 0);
        assert!(
            obs.events
                .iter()
                .all(|(e, _)| e.kind != EventKind::ImmunizationLoss)
        );
    }

    #[test]
    fn events_of_the_dead_are_discarded_never_applied() {
        let mut cfg = base_config();
        cfg.initial_susceptible = 40;
        cfg.initial_infected = 10;
        cfg.contact_rate = 2.0;
        cfg.infection_probability = 0.5;
        cfg.recovery_rate = 0.05;
        cfg.natural_death_rate = 0.05;
        cfg.horizon = 500.0;

        let mut obs = Collecting::default();
        let mut sim = Simulation::new(cfg).unwrap();
        sim.run(&mut obs).unwrap();

        // Replay the committed timeline: once an individual dies, no later
        // committed event may have it as subject.
        let mut dead: Vec<IndividualId> = Vec::new();
        for (event, _) in &obs.events {
            assert!(
                !dead.contains(&event.subject),
                "{event} applied after its subject died"
            );
            if event.kind == EventKind::Death {
                dead.push(event.subject);
            }
        }
        assert!(!dead.is_empty(), "scenario produced no deaths");
        // Their leftover queue entries surface as stale discards.
        assert!(
            obs.discards
                .iter()
                .any(|(_, r)| *r == DiscardReason::SubjectDead
                    || *r == DiscardReason::Superseded)
        );
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use super::*;

    fn busy_config(seed: u64) -> EpidemicConfig {
        let mut cfg = base_config();
        cfg.initial_immune = 5;
        cfg.death_on_infection_probability = 0.1;
        cfg.immunization = Immunization::Temporary { loss_rate: 0.005 };
        cfg.birth_rate = 0.002;
        cfg.natural_death_rate = 0.001;
        cfg.vertical_immunization_probability = 0.3;
        cfg.horizon = 1000.0;
        cfg.seed = seed;
        cfg
    }

    #[test]
    fn same_seed_same_trace() {
        let (a, stats_a) = run(busy_config(7));
        let (b, stats_b) = run(busy_config(7));
        assert_eq!(a.records(), b.records());
        assert_eq!(stats_a, stats_b);
    }

    #[test]
    fn different_seed_different_trace() {
        let (a, _) = run(busy_config(7));
        let (b, _) = run(busy_config(8));
        assert_ne!(a.records(), b.records());
    }
}

// ── Tie-break ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tie_break {
    use super::*;
    use std::cmp::Reverse;

    /// Two events constructed at the identical time apply in ascending
    /// identifier order.
    #[test]
    fn simultaneous_events_apply_in_ascending_id_order() {
        let mut cfg = base_config();
        cfg.initial_susceptible = 0;
        cfg.initial_infected = 2;
        // All rates zero: construction queues nothing, the timeline is ours.
        cfg.contact_rate = 0.0;
        cfg.infection_probability = 0.0;
        cfg.recovery_rate = 0.0;
        cfg.horizon = 10.0;

        let mut sim = Simulation::new(cfg).unwrap();
        assert_eq!(sim.scheduler.pending(), 0);

        let t = SimTime(1.0);
        for id in [IndividualId(1), IndividualId(0)] {
            sim.scheduler.queue.push(Reverse(Event {
                time: t,
                subject: id,
                seq: 0,
                kind: EventKind::Death,
            }));
        }

        let mut rng = SimRng::new(0);
        let first = sim
            .scheduler
            .step(&mut sim.population, &mut rng, &mut NoopObserver)
            .unwrap()
            .unwrap();
        let second = sim
            .scheduler
            .step(&mut sim.population, &mut rng, &mut NoopObserver)
            .unwrap()
            .unwrap();

        assert_eq!(first.subject, IndividualId(0));
        assert_eq!(second.subject, IndividualId(1));
        assert_eq!(first.time, second.time);
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    #[test]
    fn counts_sum_to_total_alive_in_every_record() {
        let mut cfg = base_config();
        cfg.death_on_infection_probability = 0.2;
        cfg.immunization = Immunization::Temporary { loss_rate: 0.01 };
        cfg.birth_rate = 0.003;
        cfg.natural_death_rate = 0.002;
        cfg.horizon = 1500.0;
        let (trace, _) = run(cfg);

        assert!(trace.len() > 1, "expected a non-trivial run");
        for record in trace.records() {
            assert_eq!(
                record.susceptible + record.infected + record.recovered_or_immune,
                record.total_alive,
                "count invariant violated at {}",
                record.time
            );
        }
    }

    #[test]
    fn trace_times_never_decrease() {
        let (trace, _) = run(base_config());
        for pair in trace.records().windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
    }

    #[test]
    fn trace_never_runs_past_the_horizon() {
        let mut cfg = base_config();
        cfg.horizon = 50.0;
        let (trace, _) = run(cfg);
        for record in trace.records() {
            assert!(record.time <= SimTime(50.0));
        }
    }

    #[test]
    fn population_is_conserved_up_to_births_and_deaths() {
        let mut cfg = base_config();
        cfg.birth_rate = 0.01;
        cfg.natural_death_rate = 0.005;
        cfg.horizon = 800.0;
        let initial = cfg.initial_population() as u64;
        let (_, stats) = run(cfg);

        assert_eq!(
            stats.final_counts.total_alive as u64,
            initial + stats.births - stats.deaths
        );
    }
}

// ── Model behaviors ───────────────────────────────────────────────────────────

#[cfg(test)]
mod behaviors {
    use super::*;

    #[test]
    fn every_recovery_gains_immunity_when_probability_is_one() {
        let mut cfg = base_config();
        cfg.horizon = 50_000.0;
        let (_, stats) = run(cfg);

        assert!(stats.recoveries > 0);
        assert_eq!(stats.immunization_gains, stats.recoveries);
    }

    #[test]
    fn no_immunity_is_gained_when_probability_is_zero() {
        let mut cfg = base_config();
        cfg.immunization_after_recovery_probability = 0.0;
        cfg.horizon = 20_000.0;
        let (_, stats) = run(cfg);

        assert!(stats.recoveries > 0);
        assert_eq!(stats.immunization_gains, 0);
        assert_eq!(stats.immunization_losses, 0);
    }

    #[test]
    fn temporary_immunity_wears_off() {
        let mut cfg = base_config();
        cfg.immunization = Immunization::Temporary { loss_rate: 0.05 };
        cfg.horizon = 20_000.0;
        let (_, stats) = run(cfg);

        assert!(stats.immunization_gains > 0);
        assert!(stats.immunization_losses > 0);
    }

    #[test]
    fn vertical_immunization_marks_every_newborn_immune() {
        let mut cfg = base_config();
        cfg.birth_rate = 0.02;
        cfg.vertical_immunization_probability = 1.0;
        cfg.horizon = 500.0;
        let initial = cfg.initial_population();

        let mut sim = Simulation::new(cfg).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.stats().births > 0, "no births happened");

        for n in initial..sim.population.len() as u32 {
            let newborn = sim.population.get(IndividualId(n)).unwrap();
            assert!(newborn.born_immune(), "{} was born susceptible", newborn.id());
        }
    }

    #[test]
    fn stop_on_extinction_halts_once_no_infected_remain() {
        let mut cfg = base_config();
        cfg.initial_susceptible = 20;
        cfg.initial_infected = 1;
        cfg.contact_rate = 0.0; // infection cannot spread
        cfg.recovery_rate = 1.0;
        cfg.horizon = 1_000_000.0;
        cfg.stop_on_extinction = true;
        let (trace, stats) = run(cfg);

        let last = trace.last().unwrap();
        assert_eq!(last.infected, 0);
        assert!(stats.final_time < SimTime(1_000_000.0));
    }

    #[test]
    fn contact_with_no_susceptibles_is_discarded_and_rearmed() {
        // One infected individual alone: its contact clock keeps firing but
        // there is never anyone to infect.
        let mut cfg = base_config();
        cfg.initial_susceptible = 0;
        cfg.initial_infected = 1;
        cfg.contact_rate = 1.0;
        cfg.infection_probability = 1.0;
        cfg.recovery_rate = 0.0;
        cfg.horizon = 50.0;

        let mut obs = Collecting::default();
        let mut sim = Simulation::new(cfg).unwrap();
        let trace = sim.run(&mut obs).unwrap();

        assert_eq!(sim.stats().infections, 0);
        assert_eq!(trace.len(), 1); // nothing ever committed
        assert!(
            obs.discards
                .iter()
                .any(|(_, r)| *r == DiscardReason::NoSusceptibleTarget)
        );
    }
}
