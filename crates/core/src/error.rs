//! Engine error taxonomy

use thiserror::Error;

/// Errors raised by the scoring engine.
///
/// Scoring is the only fallible engine operation; recommendation and task
/// derivation are total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScorecardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ScorecardError>;
