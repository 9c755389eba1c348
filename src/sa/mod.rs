//! Simulated Annealing (SA) search for the knapsack instance.
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima. The local move adds a handful of random items and repairs
//! any capacity overshoot by dropping random taken items.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod neighbor;
mod runner;
mod types;

pub use config::AnnealConfig;
pub use neighbor::generate;
pub use runner::{format_indices, AnnealResult, AnnealRunner, IterationRecord};
pub use types::{Acceptance, Candidate, Metropolis};
