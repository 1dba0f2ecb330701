//! Posture Engine - scoring and remediation engine
//!
//! Responsibilities:
//! - Combine raw signals into a 0-100 composite score
//! - Derive ordered recommendations from score + signals
//! - Derive the remediation task batch from signals
//!
//! Design principles:
//! - Pure and synchronous: no I/O, no randomness, no shared mutable state
//! - Invalid signals are rejected, never defaulted

use scorecard_core::{
    CompositeScore, Recommendation, Result, ScorecardError, SignalSet, TaskItem,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::recommendations;
use crate::tasks;

/// Breach count at which the breach component reaches zero.
///
/// Policy constant: the breach component falls linearly from 1.0 at zero
/// breaches to 0.0 at this count and stays there.
pub const BREACH_SATURATION: f64 = 5.0;

/// Tolerance used when checking that weights sum to one
const WEIGHT_EPSILON: f64 = 1e-9;

/// Relative weight of each signal in the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub password: f64,
    pub breach: f64,
    pub two_fa: f64,
}

impl ScoreWeights {
    pub const DEFAULT: ScoreWeights = ScoreWeights {
        password: 0.4,
        breach: 0.3,
        two_fa: 0.3,
    };

    pub const fn sum(&self) -> f64 {
        self.password + self.breach + self.two_fa
    }

    /// Weights must be non-negative and sum to 1.0
    pub fn validate(&self) -> Result<()> {
        let all_non_negative = [self.password, self.breach, self.two_fa]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        if !all_non_negative {
            return Err(ScorecardError::InvalidInput(format!(
                "weights must be finite and non-negative: {:?}",
                self
            )));
        }
        if (self.sum() - 1.0).abs() > WEIGHT_EPSILON {
            return Err(ScorecardError::InvalidInput(format!(
                "weights must sum to 1.0, got {}",
                self.sum()
            )));
        }
        Ok(())
    }
}

const _: () = {
    let w = ScoreWeights::DEFAULT;
    assert!(w.password >= 0.0 && w.breach >= 0.0 && w.two_fa >= 0.0);
    let drift = w.sum() - 1.0;
    assert!(drift < WEIGHT_EPSILON && drift > -WEIGHT_EPSILON);
};

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Full engine output for one signal set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub signals: SignalSet,
    pub score: CompositeScore,
    pub recommendations: Vec<Recommendation>,
    pub tasks: Vec<TaskItem>,
}

/// Engine trait
pub trait PostureEngine: Send + Sync {
    /// Composite score for a signal set
    fn compute_score(&self, signals: &SignalSet) -> Result<CompositeScore>;

    /// Ordered recommendations for a scored signal set
    fn derive_recommendations(
        &self,
        score: &CompositeScore,
        signals: &SignalSet,
    ) -> Vec<Recommendation>;

    /// Remediation task batch for a signal set
    fn derive_tasks(&self, signals: &SignalSet) -> Vec<TaskItem>;

    /// Run the whole pipeline
    fn evaluate(&self, signals: &SignalSet) -> Result<Assessment> {
        let score = self.compute_score(signals)?;
        let recommendations = self.derive_recommendations(&score, signals);
        let tasks = self.derive_tasks(signals);
        Ok(Assessment {
            signals: *signals,
            score,
            recommendations,
            tasks,
        })
    }

    /// Evaluate several signal sets independently
    fn evaluate_batch(&self, batch: &[SignalSet]) -> Vec<Result<Assessment>> {
        batch.iter().map(|signals| self.evaluate(signals)).collect()
    }

    fn weights(&self) -> ScoreWeights;
}

/// Weighted-sum engine implementation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPostureEngine {
    weights: ScoreWeights,
}

impl WeightedPostureEngine {
    /// Engine with the default 0.4 / 0.3 / 0.3 weights
    pub fn new() -> Self {
        Self {
            weights: ScoreWeights::DEFAULT,
        }
    }

    /// Engine with custom weights
    pub fn with_weights(weights: ScoreWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    fn password_component(signals: &SignalSet) -> f64 {
        f64::from(signals.password_score) / 100.0
    }

    fn breach_component(signals: &SignalSet) -> f64 {
        ((BREACH_SATURATION - f64::from(signals.breach_count)) / BREACH_SATURATION).max(0.0)
    }

    fn two_fa_component(signals: &SignalSet) -> f64 {
        if signals.two_fa_enabled { 1.0 } else { 0.0 }
    }
}

impl Default for WeightedPostureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PostureEngine for WeightedPostureEngine {
    fn compute_score(&self, signals: &SignalSet) -> Result<CompositeScore> {
        signals.validate()?;

        let weighted = Self::password_component(signals) * self.weights.password
            + Self::breach_component(signals) * self.weights.breach
            + Self::two_fa_component(signals) * self.weights.two_fa;

        // Guard against float drift past either end before narrowing.
        let value = (weighted * 100.0).round().clamp(0.0, 100.0) as u8;

        trace!(?signals, weighted, value, "computed composite score");
        Ok(CompositeScore::from_value(value))
    }

    fn derive_recommendations(
        &self,
        score: &CompositeScore,
        signals: &SignalSet,
    ) -> Vec<Recommendation> {
        recommendations::derive(score, signals)
    }

    fn derive_tasks(&self, signals: &SignalSet) -> Vec<TaskItem> {
        tasks::derive(signals)
    }

    fn weights(&self) -> ScoreWeights {
        self.weights
    }
}

/// Score a signal set with the default engine
pub fn compute_score(signals: &SignalSet) -> Result<CompositeScore> {
    WeightedPostureEngine::new().compute_score(signals)
}

/// Recommendations from the default engine
pub fn derive_recommendations(score: &CompositeScore, signals: &SignalSet) -> Vec<Recommendation> {
    WeightedPostureEngine::new().derive_recommendations(score, signals)
}

/// Task batch from the default engine
pub fn derive_tasks(signals: &SignalSet) -> Vec<TaskItem> {
    WeightedPostureEngine::new().derive_tasks(signals)
}
