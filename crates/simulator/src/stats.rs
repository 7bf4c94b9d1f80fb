//! Outcome statistics and stopping rules.

use crate::SimulatorError;
use serde::{Deserialize, Serialize};

/// Minimum number of trials before the sequential rule may stop.
pub const MIN_TRIALS: usize = 30;

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

/// Multiplier applied on top of [`Z_95`] in the half-width.
///
/// The band is twice the conventional 95% margin, so intervals are wider
/// and the sequential rule needs more trials than a standard 95% interval
/// would to reach the same relative threshold.
pub const HALF_WIDTH_SCALE: f64 = 2.0;

/// Accumulated trial outcomes (infected counts) for one population size.
#[derive(Debug, Clone, Default)]
pub struct OutcomeStats {
    outcomes: Vec<usize>,
}

impl OutcomeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, infected: usize) {
        self.outcomes.push(infected);
    }

    /// Number of outcomes collected.
    pub fn count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn outcomes(&self) -> &[usize] {
        &self.outcomes
    }

    fn require(&self, statistic: &'static str, required: usize) -> Result<(), SimulatorError> {
        if self.outcomes.len() < required {
            return Err(SimulatorError::StatisticalUndefined {
                statistic,
                samples: self.outcomes.len(),
                required,
            });
        }
        Ok(())
    }

    /// Sample mean over every collected outcome.
    pub fn mean(&self) -> Result<f64, SimulatorError> {
        self.require("mean", 1)?;
        let sum: f64 = self.outcomes.iter().map(|&x| x as f64).sum();
        Ok(sum / self.outcomes.len() as f64)
    }

    /// Bessel-corrected sample variance over every collected outcome.
    pub fn variance(&self) -> Result<f64, SimulatorError> {
        self.require("variance", 2)?;
        let mean = self.mean()?;
        let squares: f64 = self
            .outcomes
            .iter()
            .map(|&x| (x as f64 - mean).powi(2))
            .sum();
        Ok(squares / (self.outcomes.len() - 1) as f64)
    }

    /// Half-width of the confidence band: `2 * 1.96 * s / sqrt(n)`.
    pub fn half_width(&self) -> Result<f64, SimulatorError> {
        let std_dev = self.variance()?.sqrt();
        Ok(HALF_WIDTH_SCALE * Z_95 * std_dev / (self.outcomes.len() as f64).sqrt())
    }

    /// Half-width divided by the mean.
    ///
    /// Zero when the half-width is zero (every outcome identical), including
    /// the all-zero case where the mean is zero too.
    pub fn relative_half_width(&self) -> Result<f64, SimulatorError> {
        let half_width = self.half_width()?;
        if half_width == 0.0 {
            return Ok(0.0);
        }
        Ok(half_width / self.mean()?)
    }
}

/// When to stop sampling trials for a population size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StoppingRule {
    /// Keep sampling while fewer than `min_trials` outcomes exist or the
    /// relative half-width exceeds `confidence`. `max_trials` optionally
    /// caps the number of trials regardless of the interval.
    Sequential {
        min_trials: usize,
        confidence: f64,
        max_trials: Option<usize>,
    },
    /// Run exactly `trials` trials.
    Fixed { trials: usize },
}

impl Default for StoppingRule {
    fn default() -> Self {
        Self::sequential(0.1)
    }
}

impl StoppingRule {
    /// Sequential rule with the standard 30-trial minimum and no cap.
    pub fn sequential(confidence: f64) -> Self {
        StoppingRule::Sequential {
            min_trials: MIN_TRIALS,
            confidence,
            max_trials: None,
        }
    }

    /// Cap a sequential rule at `max_trials`. No effect on a fixed rule.
    pub fn with_max_trials(self, max: usize) -> Self {
        match self {
            StoppingRule::Sequential {
                min_trials,
                confidence,
                ..
            } => StoppingRule::Sequential {
                min_trials,
                confidence,
                max_trials: Some(max),
            },
            fixed => fixed,
        }
    }

    /// Whether another trial must run given the outcomes so far.
    ///
    /// The variance is never evaluated before the minimum trial count.
    pub fn should_continue(&self, stats: &OutcomeStats) -> Result<bool, SimulatorError> {
        let n = stats.count();
        match *self {
            StoppingRule::Fixed { trials } => Ok(n < trials),
            StoppingRule::Sequential {
                min_trials,
                confidence,
                max_trials,
            } => {
                if n < min_trials {
                    return Ok(true);
                }
                if max_trials.is_some_and(|max| n >= max) {
                    return Ok(false);
                }
                Ok(stats.relative_half_width()? > confidence)
            }
        }
    }
}
