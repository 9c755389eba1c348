//! The annealing loop.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::KnapsackError;
use crate::instance::Instance;

use super::config::AnnealConfig;
use super::neighbor::generate;
use super::types::{Acceptance, Candidate, Metropolis};

/// Result of one annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// The candidate held when the temperature ran out.
    pub current: Candidate,

    /// The best feasible candidate seen at any point of the run.
    pub best: Candidate,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving neighbors generated.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// One progress record per iteration: the indices currently taken and the
/// temperature after cooling.
///
/// Displays in the console-protocol form, e.g. `[0, 2] T = 90`.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// Taken indices of the current candidate, ascending.
    pub taken: Vec<usize>,
    /// Temperature after this iteration's cooling step.
    pub temperature: f64,
}

impl fmt::Display for IterationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} T = {}", format_indices(&self.taken), self.temperature)
    }
}

/// Formats indices the way the console protocol expects: `[0, 2]`.
pub fn format_indices(indices: &[usize]) -> String {
    let mut out = String::from("[");
    for (i, index) in indices.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&index.to_string());
    }
    out.push(']');
    out
}

/// Executes the annealing search.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs the search with Metropolis acceptance and no progress reporting.
    pub fn run(instance: &Instance, config: &AnnealConfig) -> Result<AnnealResult, KnapsackError> {
        Self::run_with_observer(instance, config, |_| {})
    }

    /// Runs the search, handing every [`IterationRecord`] to `observer`.
    pub fn run_with_observer<F>(
        instance: &Instance,
        config: &AnnealConfig,
        observer: F,
    ) -> Result<AnnealResult, KnapsackError>
    where
        F: FnMut(&IterationRecord),
    {
        Self::run_with_cancel(instance, config, None, observer)
    }

    /// Runs the search with an optional cancellation token, checked at the
    /// top of each iteration.
    pub fn run_with_cancel<F>(
        instance: &Instance,
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
        observer: F,
    ) -> Result<AnnealResult, KnapsackError>
    where
        F: FnMut(&IterationRecord),
    {
        Self::run_with_acceptance(instance, config, &Metropolis, cancel, observer)
    }

    /// The full loop, generic over the acceptance rule.
    ///
    /// Starting from the empty candidate, while
    /// `temperature - cooling_step > 0`: generate a neighbor, run the
    /// acceptance test on `delta = current_value - neighbor_value`, cool
    /// unconditionally, update the best-seen candidate, and emit one
    /// progress record. Zero-item instances never enter neighbor
    /// generation; the loop still cools to exhaustion over the empty
    /// candidate.
    pub fn run_with_acceptance<A, F>(
        instance: &Instance,
        config: &AnnealConfig,
        acceptance: &A,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> Result<AnnealResult, KnapsackError>
    where
        A: Acceptance,
        F: FnMut(&IterationRecord),
    {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        };

        let mut current = Candidate::empty(instance);
        let mut best = current.clone();
        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;

        while temperature - config.cooling_step > 0.0 {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            if !instance.is_empty() {
                let neighbor = generate(&current, instance, config.perturbation_bound, &mut rng)?;
                let delta = current.total_value() as i64 - neighbor.total_value() as i64;
                if delta < 0 {
                    improving_moves += 1;
                }
                if acceptance.accept(delta, temperature, &mut rng) {
                    current = neighbor;
                    accepted_moves += 1;
                }
            }

            temperature -= config.cooling_step;
            iterations += 1;

            if current.total_value() > best.total_value() {
                best = current.clone();
            }

            let record = IterationRecord {
                taken: current.taken_indices(),
                temperature,
            };
            observer(&record);
        }

        Ok(AnnealResult {
            current,
            best,
            iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Item;
    use rand::Rng;

    fn three_item_instance() -> Instance {
        Instance::new(
            10,
            vec![
                Item { value: 60, weight: 10 },
                Item { value: 100, weight: 20 },
                Item { value: 120, weight: 30 },
            ],
        )
    }

    /// Accepts improving moves only; worsening moves are always rejected.
    struct GreedyDescent;

    impl Acceptance for GreedyDescent {
        fn accept<R: Rng>(&self, delta: i64, _temperature: f64, _rng: &mut R) -> bool {
            delta < 0
        }
    }

    #[test]
    fn test_iteration_count_non_multiple_boundary() {
        // 95/10 is not integral: the loop runs floor(95/10) = 9 times.
        let instance = three_item_instance();
        let config = AnnealConfig::default()
            .with_initial_temperature(95.0)
            .with_cooling_step(10.0)
            .with_seed(42);
        let result = AnnealRunner::run(&instance, &config).unwrap();
        assert_eq!(result.iterations, 9);

        // 100/30 -> floor is 3.
        let config = AnnealConfig::default()
            .with_initial_temperature(100.0)
            .with_cooling_step(30.0)
            .with_seed(42);
        let result = AnnealRunner::run(&instance, &config).unwrap();
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_iteration_count_exact_multiple_boundary() {
        // The guard is strict, so the pass landing exactly on zero never
        // runs: 100/10 gives 9 iterations, not 10.
        let instance = three_item_instance();
        let config = AnnealConfig::default()
            .with_initial_temperature(100.0)
            .with_cooling_step(10.0)
            .with_seed(42);
        let result = AnnealRunner::run(&instance, &config).unwrap();
        assert_eq!(result.iterations, 9);
        assert!((result.final_temperature - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_items_never_generates_neighbors() {
        let instance = Instance::new(10, Vec::new());
        let config = AnnealConfig::default()
            .with_initial_temperature(100.0)
            .with_cooling_step(10.0)
            .with_seed(42);

        let mut records = Vec::new();
        let result =
            AnnealRunner::run_with_observer(&instance, &config, |r| records.push(r.clone()))
                .unwrap();

        assert_eq!(result.best.total_value(), 0);
        assert!(result.best.taken_indices().is_empty());
        assert_eq!(result.accepted_moves, 0);
        assert_eq!(records.len(), result.iterations);
        assert!(records.iter().all(|r| r.taken.is_empty()));
    }

    #[test]
    fn test_greedy_descent_converges_to_single_fitting_item() {
        // Under capacity 10 the only non-empty feasible subset is {0}, so
        // a greedy-only acceptance rule must settle there.
        let instance = three_item_instance();
        let config = AnnealConfig::default()
            .with_initial_temperature(1000.0)
            .with_cooling_step(1.0)
            .with_seed(42);

        let result =
            AnnealRunner::run_with_acceptance(&instance, &config, &GreedyDescent, None, |_| {})
                .unwrap();

        assert_eq!(result.best.total_value(), 60);
        assert_eq!(result.best.taken_indices(), vec![0]);
        assert_eq!(result.current.taken_indices(), vec![0]);
    }

    #[test]
    fn test_best_value_is_running_maximum() {
        let instance = three_item_instance();
        let config = AnnealConfig::default()
            .with_initial_temperature(200.0)
            .with_cooling_step(1.0)
            .with_seed(7);

        let value_of = |taken: &[usize]| -> u64 {
            taken
                .iter()
                .map(|&i| u64::from(instance.items[i].value))
                .sum()
        };

        let mut records = Vec::new();
        let result =
            AnnealRunner::run_with_observer(&instance, &config, |r| records.push(r.clone()))
                .unwrap();

        let mut running_best = 0u64;
        for record in &records {
            running_best = running_best.max(value_of(&record.taken));
        }
        assert_eq!(result.best.total_value(), running_best);
    }

    #[test]
    fn test_result_candidates_are_feasible() {
        let instance = three_item_instance();
        let config = AnnealConfig::default()
            .with_initial_temperature(500.0)
            .with_cooling_step(1.0)
            .with_seed(13);
        let result = AnnealRunner::run(&instance, &config).unwrap();

        assert!(!result.current.is_overweight(instance.capacity));
        assert!(!result.best.is_overweight(instance.capacity));
        assert!(result.accepted_moves >= result.improving_moves);
        assert!(result.best.total_value() >= result.current.total_value());
    }

    #[test]
    fn test_cancellation() {
        let instance = three_item_instance();
        let config = AnnealConfig::default()
            .with_initial_temperature(1e6)
            .with_cooling_step(1.0)
            .with_seed(42);

        // Set the flag before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            AnnealRunner::run_with_cancel(&instance, &config, Some(cancel), |_| {}).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let instance = three_item_instance();
        let config = AnnealConfig::default().with_cooling_step(-1.0);
        let err = AnnealRunner::run(&instance, &config).unwrap_err();
        assert!(matches!(err, KnapsackError::InvalidConfig(_)));
    }

    #[test]
    fn test_iteration_record_display() {
        let record = IterationRecord {
            taken: vec![0, 2],
            temperature: 90.0,
        };
        assert_eq!(record.to_string(), "[0, 2] T = 90");

        let record = IterationRecord {
            taken: Vec::new(),
            temperature: 2.5,
        };
        assert_eq!(record.to_string(), "[] T = 2.5");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let instance = three_item_instance();
        let config = AnnealConfig::default()
            .with_initial_temperature(300.0)
            .with_cooling_step(1.0)
            .with_seed(2024);

        let a = AnnealRunner::run(&instance, &config).unwrap();
        let b = AnnealRunner::run(&instance, &config).unwrap();

        assert_eq!(a.current, b.current);
        assert_eq!(a.best, b.best);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }
}
