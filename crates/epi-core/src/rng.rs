//! Deterministic run-level RNG and exponential waiting-time sampling.
//!
//! # Determinism strategy
//!
//! Randomness is never ambient: one `SimRng`, seeded from the run
//! configuration, is threaded explicitly through the scheduler and every
//! sampling site.  Because the engine is strictly sequential, a single RNG
//! consumed in timeline order is enough to make whole runs reproducible —
//! the same seed and configuration always yield byte-identical traces.

use rand::Rng;
use rand::rngs::SmallRng;
use rand::{SeedableRng, distributions::Distribution};
use rand_distr::Exp;

use crate::error::RateError;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded RNG for one simulation run.
///
/// Intentionally `!Sync`: a run's RNG must never be shared between threads.
/// Independent replications each get their own `SimRng`.
#[derive(Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── RateClock ─────────────────────────────────────────────────────────────────

/// Samples exponentially distributed waiting times for one event class.
///
/// Each event class is an independent Poisson process; the engine's timeline
/// is their superposition.  `RateClock` owns the per-class randomness model
/// (the memoryless exponential interval), while `SimRng` supplies the
/// underlying random stream.
#[derive(Copy, Clone, Debug, Default)]
pub struct RateClock;

impl RateClock {
    /// Sample the waiting time until the next event of a class firing at
    /// `rate` events per unit time.
    ///
    /// A non-positive or non-finite rate means "this event class never
    /// fires": callers get [`RateError::InvalidRate`] and must exclude the
    /// class from scheduling rather than treat the error as fatal.
    pub fn sample(&self, rate: f64, rng: &mut SimRng) -> Result<f64, RateError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RateError::InvalidRate { rate });
        }
        // Exp::new only fails on the non-positive rates already rejected above.
        let exp = Exp::new(rate).map_err(|_| RateError::InvalidRate { rate })?;
        Ok(exp.sample(rng.inner()))
    }
}
