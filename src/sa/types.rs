//! Candidate solutions and the acceptance criterion.

use rand::Rng;

use crate::instance::Instance;

/// A candidate subset of the item catalog.
///
/// Holds a boolean inclusion vector index-aligned with the catalog plus the
/// cached total value and weight of the included items. Candidates are
/// finalized at construction and never mutated afterwards; deriving a
/// neighbor always produces a fresh owned copy, so a neighbor can never
/// alias the candidate it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    inclusion: Vec<bool>,
    total_value: u64,
    total_weight: u64,
}

impl Candidate {
    /// The empty candidate: nothing taken, value and weight zero.
    pub fn empty(instance: &Instance) -> Self {
        Self {
            inclusion: vec![false; instance.len()],
            total_value: 0,
            total_weight: 0,
        }
    }

    /// Builds a candidate from an inclusion vector, computing its totals.
    ///
    /// # Panics
    ///
    /// Panics if the vector length differs from the catalog length; the two
    /// are index-aligned by contract.
    pub fn from_inclusion(inclusion: Vec<bool>, instance: &Instance) -> Self {
        assert_eq!(
            inclusion.len(),
            instance.len(),
            "inclusion vector must be index-aligned with the catalog"
        );
        let mut candidate = Self {
            inclusion,
            total_value: 0,
            total_weight: 0,
        };
        let (value, weight) = candidate.evaluate(instance);
        candidate.total_value = value;
        candidate.total_weight = weight;
        candidate
    }

    /// Sums value and weight over the included items.
    ///
    /// Pure O(n) fold over the inclusion vector; the cached totals are not
    /// consulted or touched.
    pub fn evaluate(&self, instance: &Instance) -> (u64, u64) {
        let mut value = 0u64;
        let mut weight = 0u64;
        for (taken, item) in self.inclusion.iter().zip(&instance.items) {
            if *taken {
                value += u64::from(item.value);
                weight += u64::from(item.weight);
            }
        }
        (value, weight)
    }

    /// Total value of the included items (the fitness being maximized).
    pub fn total_value(&self) -> u64 {
        self.total_value
    }

    /// Total weight of the included items.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Whether the candidate exceeds the given capacity.
    pub fn is_overweight(&self, capacity: u64) -> bool {
        self.total_weight > capacity
    }

    /// The inclusion vector, index-aligned with the catalog.
    pub fn inclusion(&self) -> &[bool] {
        &self.inclusion
    }

    /// Indices of taken items, ascending.
    pub fn taken_indices(&self) -> Vec<usize> {
        self.inclusion
            .iter()
            .enumerate()
            .filter_map(|(i, taken)| taken.then_some(i))
            .collect()
    }

    /// Indices of non-taken items, ascending.
    pub fn non_taken_indices(&self) -> Vec<usize> {
        self.inclusion
            .iter()
            .enumerate()
            .filter_map(|(i, taken)| (!taken).then_some(i))
            .collect()
    }

    /// One `1`/`0` character per catalog item, by index.
    pub fn inclusion_string(&self) -> String {
        self.inclusion
            .iter()
            .map(|&taken| if taken { '1' } else { '0' })
            .collect()
    }
}

/// Decides whether a neighbor replaces the current candidate.
///
/// `delta` is `current_value - neighbor_value`: an improving neighbor gives
/// a negative delta. The trait is a seam for tests that need a
/// deterministic rule in place of the stochastic one.
pub trait Acceptance {
    fn accept<R: Rng>(&self, delta: i64, temperature: f64, rng: &mut R) -> bool;
}

/// The standard Metropolis criterion.
///
/// Improving moves are accepted unconditionally; a worsening move with
/// difference `delta >= 0` is accepted with probability
/// `exp(-delta / temperature)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Metropolis;

impl Acceptance for Metropolis {
    fn accept<R: Rng>(&self, delta: i64, temperature: f64, rng: &mut R) -> bool {
        if delta < 0 {
            return true;
        }
        if temperature <= 0.0 {
            return false;
        }
        let probability = (-(delta as f64) / temperature).exp();
        rng.random_range(0.0..1.0) < probability
    }
}
