//! Run configuration and fail-fast validation.

use crate::error::ConfigError;

// ── Immunization ──────────────────────────────────────────────────────────────

/// Whether granted immunity lasts forever or decays at an exponential rate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Immunization {
    /// Immune individuals stay immune until death.
    Permanent,
    /// Immunity is lost at `loss_rate` events per unit time.
    Temporary { loss_rate: f64 },
}

impl Immunization {
    /// The immunity-loss rate, or `None` under permanent immunization.
    #[inline]
    pub fn loss_rate(self) -> Option<f64> {
        match self {
            Immunization::Permanent => None,
            Immunization::Temporary { loss_rate } => Some(loss_rate),
        }
    }
}

// ── EpidemicConfig ────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from a JSON/TOML file by the application
/// crate (enable the `serde` feature) and handed to `Simulation::new`, which
/// calls [`EpidemicConfig::validate`] before scheduling anything.
///
/// All probabilities are in [0, 1].  Rates are finite and non-negative; a
/// zero rate disables the corresponding process entirely (the scheduler
/// treats a non-positive rate as "never fires").
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpidemicConfig {
    /// Individuals starting Susceptible.
    pub initial_susceptible: u32,
    /// Individuals starting Infected.
    pub initial_infected: u32,
    /// Individuals starting Immune.
    pub initial_immune: u32,

    /// Probability that a contact between an Infected and a Susceptible
    /// transmits the infection.
    pub infection_probability: f64,
    /// Probability that an infection resolves in death rather than recovery.
    pub death_on_infection_probability: f64,
    /// Probability that a recovered individual becomes Immune.
    pub immunization_after_recovery_probability: f64,
    /// Probability that a newborn inherits immunity from a parent.
    pub vertical_immunization_probability: f64,

    /// Rate of contacts per infected individual per unit time.
    pub contact_rate: f64,
    /// Rate at which an infection resolves (recovery or death on infection).
    pub recovery_rate: f64,
    /// Per-individual birth rate (vital dynamics).
    pub birth_rate: f64,
    /// Per-individual natural death rate, independent of disease status.
    pub natural_death_rate: f64,

    /// Permanent or temporary immunity.
    pub immunization: Immunization,

    /// Maximum simulated time; reaching it is normal termination.
    pub horizon: f64,
    /// Master RNG seed.  Same seed + same config = identical trace.
    pub seed: u64,
    /// Stop early once no Infected remain and the model cannot create new
    /// ones (no infected newborns are possible in this model).
    pub stop_on_extinction: bool,
}

impl EpidemicConfig {
    /// Total number of individuals at t = 0.
    #[inline]
    pub fn initial_population(&self) -> u32 {
        self.initial_susceptible + self.initial_infected + self.initial_immune
    }

    /// Check every parameter bound.  Called by `Simulation::new` before any
    /// event is scheduled; an error here is fatal to the run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("infection_probability", self.infection_probability)?;
        check_probability(
            "death_on_infection_probability",
            self.death_on_infection_probability,
        )?;
        check_probability(
            "immunization_after_recovery_probability",
            self.immunization_after_recovery_probability,
        )?;
        check_probability(
            "vertical_immunization_probability",
            self.vertical_immunization_probability,
        )?;

        check_rate("contact_rate", self.contact_rate)?;
        check_rate("recovery_rate", self.recovery_rate)?;
        check_rate("birth_rate", self.birth_rate)?;
        check_rate("natural_death_rate", self.natural_death_rate)?;

        if let Some(loss_rate) = self.immunization.loss_rate() {
            if !loss_rate.is_finite() || loss_rate <= 0.0 {
                return Err(ConfigError::ImmunizationLossRate { value: loss_rate });
            }
        }

        if !self.horizon.is_finite() || self.horizon < 0.0 {
            return Err(ConfigError::Horizon { value: self.horizon });
        }
        if self.initial_population() == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Probability { name, value });
    }
    Ok(())
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Rate { name, value });
    }
    Ok(())
}
