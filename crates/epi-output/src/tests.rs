//! Integration tests for epi-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use epi_core::SimTime;
    use epi_sim::TraceRecord;

    use crate::csv::CsvTraceWriter;
    use crate::writer::TraceWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn record(time: f64, susceptible: u32, infected: u32) -> TraceRecord {
        TraceRecord {
            time: SimTime(time),
            susceptible,
            infected,
            recovered_or_immune: 0,
            total_alive: susceptible + infected,
        }
    }

    #[test]
    fn csv_file_created_with_header() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let path = dir.path().join("trace.csv");
        assert!(path.exists());
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["time", "susceptible", "infected", "recovered_or_immune", "total_alive"]
        );
    }

    #[test]
    fn csv_records_round_trip() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_record(&record(0.0, 99, 1)).unwrap();
        w.write_record(&record(3.25, 98, 2)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("trace.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "99");
        assert_eq!(&rows[1][0], "3.25");
        assert_eq!(&rows[1][2], "2");
    }

    #[test]
    fn double_finish_is_fine() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use epi_core::{EpidemicConfig, Immunization};
    use epi_sim::Simulation;

    use crate::csv::CsvTraceWriter;
    use crate::observer::TraceObserver;

    fn config() -> EpidemicConfig {
        EpidemicConfig {
            initial_susceptible: 30,
            initial_infected: 5,
            initial_immune: 0,
            infection_probability: 0.1,
            death_on_infection_probability: 0.0,
            immunization_after_recovery_probability: 1.0,
            vertical_immunization_probability: 0.0,
            contact_rate: 1.0,
            recovery_rate: 0.05,
            birth_rate: 0.0,
            natural_death_rate: 0.0,
            immunization: Immunization::Permanent,
            horizon: 2000.0,
            seed: 11,
            stop_on_extinction: false,
        }
    }

    #[test]
    fn streamed_rows_match_the_returned_trace() {
        let dir = TempDir::new().unwrap();

        let mut sim = Simulation::new(config()).unwrap();
        let writer = CsvTraceWriter::new(dir.path()).unwrap();
        let mut obs = TraceObserver::new(writer, sim.population.counts()).unwrap();
        let trace = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("trace.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), trace.len());

        for (row, rec) in rows.iter().zip(trace.records()) {
            assert_eq!(row[1].parse::<u32>().unwrap(), rec.susceptible);
            assert_eq!(row[2].parse::<u32>().unwrap(), rec.infected);
            assert_eq!(row[4].parse::<u32>().unwrap(), rec.total_alive);
        }
    }
}

#[cfg(test)]
mod summary_tests {
    use epi_sim::RunStats;

    use crate::summary;

    #[test]
    fn summary_mentions_every_counter() {
        let mut stats = RunStats::default();
        stats.infections = 12;
        stats.deaths = 3;
        stats.events_applied = 40;
        stats.events_discarded = 7;

        let text = summary::render(&stats);
        assert!(text.contains("infections:           12"));
        assert!(text.contains("deaths:               3"));
        assert!(text.contains("40 events applied"));
        assert!(text.contains("7 stale events discarded"));
    }
}
