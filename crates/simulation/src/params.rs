//! Contagion parameters.

use plaguesim_types::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How endogenous pressure from infected contacts combines with the
/// exogenous baseline rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardMode {
    /// `rate *= gamma * weight` per infected contact (reinforcing risk).
    #[default]
    Multiplicative,
    /// `rate += gamma * weight` per infected contact (independent risks).
    Additive,
}

impl HazardMode {
    /// Value of gamma that leaves the baseline rate untouched.
    pub fn neutral_gamma(self) -> f64 {
        match self {
            HazardMode::Multiplicative => 1.0,
            HazardMode::Additive => 0.0,
        }
    }

    /// Fold one infected contact of the given weight into `rate`.
    pub fn combine(self, rate: f64, gamma: f64, weight: f64) -> f64 {
        match self {
            HazardMode::Multiplicative => rate * (gamma * weight),
            HazardMode::Additive => rate + gamma * weight,
        }
    }
}

impl fmt::Display for HazardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardMode::Multiplicative => f.write_str("Multiplicative"),
            HazardMode::Additive => f.write_str("Additive"),
        }
    }
}

/// Rates driving the SIS process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContagionParams {
    /// Endogenous multiplier (gamma).
    pub gamma: f64,

    /// Total exogenous rate budget (C), split evenly across the population.
    pub exogenous_budget: f64,

    /// Per-individual cure rate (mu).
    pub cure_rate: f64,

    /// Combination law for endogenous pressure.
    pub hazard_mode: HazardMode,
}

impl Default for ContagionParams {
    fn default() -> Self {
        Self {
            gamma: 1.1,
            exogenous_budget: 10.0,
            cure_rate: 1.0,
            hazard_mode: HazardMode::Multiplicative,
        }
    }
}

impl ContagionParams {
    /// Create parameters with the default (multiplicative) combination law.
    pub fn new(gamma: f64, exogenous_budget: f64, cure_rate: f64) -> Self {
        Self {
            gamma,
            exogenous_budget,
            cure_rate,
            ..Default::default()
        }
    }

    /// Set the endogenous multiplier.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the total exogenous budget.
    pub fn with_exogenous_budget(mut self, budget: f64) -> Self {
        self.exogenous_budget = budget;
        self
    }

    /// Set the cure rate.
    pub fn with_cure_rate(mut self, cure_rate: f64) -> Self {
        self.cure_rate = cure_rate;
        self
    }

    /// Set the hazard combination law.
    pub fn with_hazard_mode(mut self, mode: HazardMode) -> Self {
        self.hazard_mode = mode;
        self
    }

    /// Exogenous baseline rate of one individual in a population of `population`.
    pub fn baseline_rate(&self, population: usize) -> Result<f64, ConfigError> {
        if population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        Ok(self.exogenous_budget / population as f64)
    }

    /// Check every rate lies in its domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gamma.is_finite() || self.gamma < 0.0 {
            return Err(ConfigError::invalid(
                "gamma",
                format!("must be finite and non-negative, got {}", self.gamma),
            ));
        }
        if !self.exogenous_budget.is_finite() || self.exogenous_budget < 0.0 {
            return Err(ConfigError::invalid(
                "exogenous_budget",
                format!(
                    "must be finite and non-negative, got {}",
                    self.exogenous_budget
                ),
            ));
        }
        if !self.cure_rate.is_finite() || self.cure_rate <= 0.0 {
            return Err(ConfigError::invalid(
                "cure_rate",
                format!("must be finite and positive, got {}", self.cure_rate),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_splits_budget() {
        let params = ContagionParams::new(1.0, 12.0, 1.0);
        assert_eq!(params.baseline_rate(4), Ok(3.0));
        assert_eq!(params.baseline_rate(0), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_neutral_gamma_leaves_rate_unchanged() {
        for mode in [HazardMode::Multiplicative, HazardMode::Additive] {
            assert_eq!(mode.combine(2.5, mode.neutral_gamma(), 1.0), 2.5);
        }
    }

    #[test]
    fn test_validate_rejects_out_of_domain_rates() {
        assert!(ContagionParams::default().validate().is_ok());
        assert!(ContagionParams::default().with_gamma(0.0).validate().is_ok());
        assert!(ContagionParams::default().with_gamma(-1.0).validate().is_err());
        assert!(ContagionParams::default()
            .with_exogenous_budget(f64::NAN)
            .validate()
            .is_err());
        assert!(ContagionParams::default().with_cure_rate(0.0).validate().is_err());
    }
}
