//! Heuristic optimizer for the 0/1 knapsack problem.
//!
//! Given a capacity, a catalog of items (value, weight) and an annealing
//! schedule, searches for a subset of items maximizing total value subject
//! to total weight not exceeding the capacity. The search is simulated
//! annealing over inclusion vectors: each iteration derives a neighbor by
//! adding a few random items and repairing any overshoot, applies the
//! Metropolis acceptance test, and cools a temperature by a fixed step
//! until it runs out.
//!
//! # Architecture
//!
//! - [`instance`]: the immutable problem instance and its three-line text
//!   format.
//! - [`sa`]: candidate representation, neighbor generation, and the
//!   annealing loop.
//! - [`error`]: the error taxonomy; every error aborts the one-shot run.
//!
//! The search is single-threaded by nature: each iteration depends on the
//! previous one, so one annealing chain cannot be parallelized.

pub mod error;
pub mod instance;
pub mod sa;
