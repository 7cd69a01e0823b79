// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all GoE kernel failures.
///
/// Numerical degeneracy of the metric is deliberately absent: a singular
/// metric degrades to a pseudo-inverse and is reported through `log`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GoeError {
    /// Configuration parameter out of range.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid call-site input (coordinates, index positions, spans).
    #[error("validation error: {0}")]
    Validation(String),

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),

    /// ODE solver gave up (step size underflow, non-finite state).
    #[error("integration failed: {0}")]
    Integration(String),

    /// ODE solver exhausted its step budget.
    #[error("integration exceeded {max_steps} steps")]
    StepBudget { max_steps: usize },
}

pub type GoeResult<T> = Result<T, GoeError>;
