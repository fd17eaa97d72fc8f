//! outbreak — closed-population SIR run with permanent immunization.
//!
//! 100 individuals, 10 initially infected, no births or natural deaths.
//! Every recovery confers permanent immunity, so the epidemic always burns
//! out; the run stops as soon as the last infection clears.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use epi_core::{EpidemicConfig, Immunization};
use epi_output::{summary, CsvTraceWriter, TraceObserver};
use epi_sim::Simulation;

// ── Constants ─────────────────────────────────────────────────────────────────

const SUSCEPTIBLE: u32 = 90;
const INFECTED:    u32 = 10;
const SEED:        u64 = 42;
const HORIZON:     f64 = 5_000.0;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== outbreak — SIR with permanent immunization ===");
    println!("Population: {}  |  Infected: {INFECTED}  |  Seed: {SEED}", SUSCEPTIBLE + INFECTED);
    println!();

    let config = EpidemicConfig {
        initial_susceptible: SUSCEPTIBLE,
        initial_infected:    INFECTED,
        initial_immune:      0,

        infection_probability:                  0.3,
        death_on_infection_probability:         0.0,
        immunization_after_recovery_probability: 1.0,
        vertical_immunization_probability:      0.0,

        contact_rate:       0.01,
        recovery_rate:      0.003,
        birth_rate:         0.0,
        natural_death_rate: 0.0,

        immunization: Immunization::Permanent,

        horizon:            HORIZON,
        seed:               SEED,
        stop_on_extinction: true,
    };

    let mut sim = Simulation::new(config)?;

    std::fs::create_dir_all("output/outbreak")?;
    let writer = CsvTraceWriter::new(Path::new("output/outbreak"))?;
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
