//! Error types surfaced by the optimizer.
//!
//! This is a one-shot batch computation: every error aborts the run, there
//! are no retries and no partial-result recovery.

use thiserror::Error;

/// Errors emitted while loading an instance or running the annealer.
#[derive(Debug, Error)]
pub enum KnapsackError {
    /// The instance text is malformed (wrong token counts, non-numeric
    /// fields, or value/weight length mismatch). Loading fails fast instead
    /// of proceeding with a degenerate zero-item or zero-capacity instance.
    #[error("invalid input on line {line}: {reason}")]
    InvalidInput {
        /// 1-based line number within the instance text.
        line: usize,
        reason: String,
    },

    /// The instance file is missing or unreadable.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Weight repair emptied a candidate without restoring feasibility.
    #[error("infeasible instance: {0}")]
    Infeasible(String),

    /// The annealing parameters failed validation.
    #[error("invalid annealing configuration: {0}")]
    InvalidConfig(String),
}
