//! Continuous simulated time.
//!
//! # Design
//!
//! The engine is a continuous-time Markov model: event times are sums of
//! exponentially distributed waiting times, so the canonical time unit is a
//! real number, not a tick counter.  `SimTime` wraps an `f64` and provides a
//! *total* ordering via [`f64::total_cmp`] so it can key a `BinaryHeap` and a
//! `BTreeMap` directly.
//!
//! Every `SimTime` produced by the engine is finite and non-negative: waiting
//! times come from `RateClock` (which rejects non-finite samples) and are only
//! ever added to an already-finite clock value.  NaN is representable but
//! never constructed; `total_cmp` keeps the ordering well-defined regardless.

use std::fmt;
use std::ops::Add;

/// An absolute point on the simulation timeline.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The point `wait` time units after `self`.
    #[inline]
    pub fn after(self, wait: f64) -> SimTime {
        SimTime(self.0 + wait)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.4}", self.0)
    }
}
