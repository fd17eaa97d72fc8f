//! Core error types.
//!
//! Sub-crates define their own error enums and wrap these via `From` impls
//! where a conversion makes sense.

use thiserror::Error;

/// Invalid run configuration, detected before any event is scheduled.
///
/// Always fatal to the run; never retried.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("probability `{name}` must be in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("rate `{name}` must be finite and non-negative, got {value}")]
    Rate { name: &'static str, value: f64 },

    #[error("immunization loss rate must be finite and positive, got {value}")]
    ImmunizationLossRate { value: f64 },

    #[error("time horizon must be finite and non-negative, got {value}")]
    Horizon { value: f64 },

    #[error("initial population is empty (susceptible + infected + immune must be >= 1)")]
    EmptyPopulation,
}

/// A non-positive rate was requested for exponential sampling.
///
/// Not fatal: the event class simply never fires and is excluded from
/// scheduling.
#[derive(Debug, Error, PartialEq)]
pub enum RateError {
    #[error("cannot sample a waiting time at rate {rate}")]
    InvalidRate { rate: f64 },
}
