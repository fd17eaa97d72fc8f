//! End-of-run text report.

use std::fmt::Write;

use epi_sim::RunStats;

/// Render the stats block printed after a run.
pub fn render(stats: &RunStats) -> String {
    let c = stats.final_counts;
    let mut out = String::new();
    // Writing to a String cannot fail; the let bindings keep `write!` tidy.
    let _ = writeln!(out, "Situation at the end of the simulation ({}):", stats.final_time);
    let _ = writeln!(out, "- susceptible:          {}", c.susceptible);
    let _ = writeln!(out, "- infected:             {}", c.infected);
    let _ = writeln!(out, "- recovered or immune:  {}", c.recovered_or_immune);
    let _ = writeln!(out, "- alive:                {}", c.total_alive);
    let _ = writeln!(out, "Event totals:");
    let _ = writeln!(out, "- infections:           {}", stats.infections);
    let _ = writeln!(out, "- recoveries:           {}", stats.recoveries);
    let _ = writeln!(out, "- deaths:               {}", stats.deaths);
    let _ = writeln!(out, "- births:               {}", stats.births);
    let _ = writeln!(out, "- immunizations gained: {}", stats.immunization_gains);
    let _ = writeln!(out, "- immunizations lost:   {}", stats.immunization_losses);
    let _ = writeln!(
        out,
        "Timeline: {} events applied, {} stale events discarded",
        stats.events_applied, stats.events_discarded
    );
    out
}
