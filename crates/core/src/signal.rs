//! Raw security signals fed into the scoring engine

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScorecardError};

/// Upper bound of the password-strength signal
pub const MAX_PASSWORD_SCORE: i32 = 100;

/// The three raw signals a scan produces.
///
/// Fields are signed so out-of-domain values arriving from untyped sources
/// can be represented and rejected by [`SignalSet::validate`] instead of
/// being silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSet {
    /// Aggregate password strength/reuse health, 0..=100
    pub password_score: i32,
    /// Number of known breaches, no upper bound
    pub breach_count: i32,
    pub two_fa_enabled: bool,
}

impl SignalSet {
    pub fn new(password_score: i32, breach_count: i32, two_fa_enabled: bool) -> Self {
        Self {
            password_score,
            breach_count,
            two_fa_enabled,
        }
    }

    /// Check every field against its domain
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_PASSWORD_SCORE).contains(&self.password_score) {
            return Err(ScorecardError::InvalidInput(format!(
                "password score must be within 0..={}, got {}",
                MAX_PASSWORD_SCORE, self.password_score
            )));
        }
        if self.breach_count < 0 {
            return Err(ScorecardError::InvalidInput(format!(
                "breach count must not be negative, got {}",
                self.breach_count
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
