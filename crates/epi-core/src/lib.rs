//! `epi-core` — foundational types for the `epi` epidemic simulation workspace.
//!
//! This crate is a dependency of every other `epi-*` crate.  It intentionally
//! has no `epi-*` dependencies and minimal external ones (only `rand`,
//! `rand_distr`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `IndividualId`                                        |
//! | [`time`]    | `SimTime` (continuous simulated time)                 |
//! | [`rng`]     | `SimRng` (seeded run RNG), `RateClock`                |
//! | [`config`]  | `EpidemicConfig`, `Immunization`                      |
//! | [`error`]   | `ConfigError`, `RateError`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EpidemicConfig, Immunization};
pub use error::{ConfigError, RateError};
pub use ids::IndividualId;
pub use rng::{RateClock, SimRng};
pub use time::SimTime;
