//! Annealing schedule configuration.

use crate::error::KnapsackError;

/// Configuration for one annealing run.
///
/// The schedule is linear: the temperature starts at
/// `initial_temperature` and loses `cooling_step` every iteration; the loop
/// runs while `temperature - cooling_step > 0`.
///
/// # Examples
///
/// ```
/// use knapsack_anneal::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(100.0)
///     .with_cooling_step(10.0)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Starting temperature. Higher values accept more worsening moves
    /// early on.
    pub initial_temperature: f64,

    /// Fixed decrement subtracted from the temperature each iteration.
    ///
    /// Deliberately named apart from the per-iteration value difference
    /// used in the acceptance test; the two are unrelated quantities.
    pub cooling_step: f64,

    /// Maximum number of items added in one neighbor step before weight
    /// repair. The draw is uniform in `[1, perturbation_bound]`.
    pub perturbation_bound: usize,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_step: 1.0,
            perturbation_bound: 4,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_step(mut self, step: f64) -> Self {
        self.cooling_step = step;
        self
    }

    pub fn with_perturbation_bound(mut self, bound: usize) -> Self {
        self.perturbation_bound = bound;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(KnapsackError::InvalidConfig(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !self.cooling_step.is_finite() || self.cooling_step <= 0.0 {
            return Err(KnapsackError::InvalidConfig(format!(
                "cooling_step must be positive and finite, got {}",
                self.cooling_step
            )));
        }
        if self.perturbation_bound == 0 {
            return Err(KnapsackError::InvalidConfig(
                "perturbation_bound must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
