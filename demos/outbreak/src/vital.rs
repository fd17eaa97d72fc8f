//! vital — SIRS run with vital dynamics and temporary immunization.
//!
//! Adds births, natural deaths, extra mortality while infected, vertical
//! immunization of newborns, and immunity that wears off over time.  With
//! immunity being lost the disease can become endemic, so the run ends at
//! the horizon rather than at extinction.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use epi_core::{EpidemicConfig, Immunization};
use epi_output::{summary, CsvTraceWriter, TraceObserver};
use epi_sim::Simulation;

// ── Constants ─────────────────────────────────────────────────────────────────

const SUSCEPTIBLE: u32 = 85;
const INFECTED:    u32 = 10;
const IMMUNE:      u32 = 5;
const SEED:        u64 = 7;
const HORIZON:     f64 = 10_000.0;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== vital — SIRS with births, deaths and waning immunity ===");
    println!(
        "Population: {}  |  Infected: {INFECTED}  |  Immune: {IMMUNE}  |  Seed: {SEED}",
        SUSCEPTIBLE + INFECTED + IMMUNE
    );
    println!();

    let config = EpidemicConfig {
        initial_susceptible: SUSCEPTIBLE,
        initial_infected:    INFECTED,
        initial_immune:      IMMUNE,

        infection_probability:                  0.3,
        death_on_infection_probability:         0.05,
        immunization_after_recovery_probability: 0.9,
        vertical_immunization_probability:      0.5,

        contact_rate:       0.01,
        recovery_rate:      0.003,
        birth_rate:         0.0001,
        natural_death_rate: 0.00005,

        immunization: Immunization::Temporary { loss_rate: 0.001 },

        horizon:            HORIZON,
        seed:               SEED,
        stop_on_extinction: false,
    };

    let mut sim = Simulation::new(config)?;

    std::fs::create_dir_all("output/vital")?;
    let writer = CsvTraceWriter::new(Path::new("output/vital"))?;
    let mut obs = TraceObserver::new(writer, sim.population.counts())?;

    let t0 = Instant::now();
    let trace = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  trace.csv : {} rows", trace.len());
    println!();
    print!("{}", summary::render(sim.stats()));

    Ok(())
}
