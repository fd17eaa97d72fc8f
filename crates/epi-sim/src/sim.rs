//! The `Simulation` struct: configuration in, finished trace out.

use epi_core::{EpidemicConfig, IndividualId, SimRng, SimTime};
use epi_model::{HealthState, Individual, Population};

use crate::error::SimResult;
use crate::observer::SimObserver;
use crate::scheduler::EventScheduler;
use crate::stats::RunStats;
use crate::trace::{SimulationTrace, TraceRecord};

/// Orchestrates one run: builds the initial population, schedules the first
/// event for every individual, then drives [`EventScheduler::step`] until the
/// timeline is exhausted or the horizon is reached, snapshotting the
/// aggregate counts after every committed event.
///
/// A `Simulation` runs once; build a fresh one (same config, same seed) to
/// reproduce a run.
#[derive(Debug)]
pub struct Simulation {
    pub config: EpidemicConfig,
    pub population: Population,
    pub scheduler: EventScheduler,
    rng: SimRng,
    stats: RunStats,
}

impl Simulation {
    /// Validate the configuration, build the initial population, and queue
    /// everyone's first pending event.
    ///
    /// Individuals are laid out in ID order: susceptibles first, then
    /// immunes, then infecteds.  Under temporary immunization the initial
    /// immunes get their expiry sampled at t = 0, before any scheduling.
    pub fn new(config: EpidemicConfig) -> SimResult<Self> {
        config.validate()?;

        let mut rng = SimRng::new(config.seed);
        let mut scheduler = EventScheduler::new(&config);
        let mut population = Population::new();

        let susceptible = config.initial_susceptible;
        let immune = config.initial_immune;
        let infected = config.initial_infected;

        let mut next = 0u32;
        for _ in 0..susceptible {
            population.insert(Individual::new(IndividualId(next), HealthState::Susceptible))?;
            next += 1;
        }
        for _ in 0..immune {
            let id = IndividualId(next);
            population.insert(Individual::new(id, HealthState::Immune))?;
            let expires_at = scheduler.sample_immunity_expiry(&mut rng);
            population.set_immunity_expiry(id, expires_at)?;
            next += 1;
        }
        for _ in 0..infected {
            population.insert(Individual::new(IndividualId(next), HealthState::Infected))?;
            next += 1;
        }

        for individual in population.alive() {
            scheduler.schedule_next(individual, &mut rng);
        }

        Ok(Self {
            config,
            population,
            scheduler,
            rng,
            stats: RunStats::default(),
        })
    }

    /// Drive the timeline to completion and return the trace.
    ///
    /// The trace always starts with the t = 0 snapshot; every committed event
    /// appends one record.  Termination is normal on: timeline exhausted,
    /// earliest pending time beyond the horizon, or (when
    /// `stop_on_extinction` is set) no Infected left — newborns are never
    /// infected in this model, so extinction is irreversible.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimulationTrace> {
        let mut trace = SimulationTrace::new();
        let mut counts = self.population.counts();
        trace.push(TraceRecord::new(SimTime::ZERO, counts));

        loop {
            let Some(event) = self
                .scheduler
                .step(&mut self.population, &mut self.rng, observer)?
            else {
                break;
            };
            self.stats.record_applied(event.kind);
            counts = self.population.counts();
            trace.push(TraceRecord::new(event.time, counts));
            observer.on_event(&event, counts);

            if self.config.stop_on_extinction && counts.infected == 0 {
                log::info!("stopping early at {}: infection extinct", event.time);
                break;
            }
        }

        self.stats.events_discarded = self.scheduler.discarded();
        self.stats.final_counts = counts;
        if let Some(last) = trace.last() {
            self.stats.final_time = last.time;
        }
        log::info!(
            "run finished at {}: {} events applied, {} discarded",
            self.stats.final_time,
            self.stats.events_applied,
            self.stats.events_discarded,
        );
        observer.on_run_end(&self.stats);
        Ok(trace)
    }

    /// Statistics accumulated by [`run`][Self::run].
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}
