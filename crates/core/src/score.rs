//! Composite score and its qualitative label

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreLabel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreLabel {
    /// Lower bound (inclusive) of the Excellent band
    pub const EXCELLENT_THRESHOLD: u8 = 80;
    /// Lower bound (inclusive) of the Good band
    pub const GOOD_THRESHOLD: u8 = 60;
    /// Lower bound (inclusive) of the Fair band
    pub const FAIR_THRESHOLD: u8 = 40;

    pub fn from_value(value: u8) -> Self {
        if value >= Self::EXCELLENT_THRESHOLD {
            ScoreLabel::Excellent
        } else if value >= Self::GOOD_THRESHOLD {
            ScoreLabel::Good
        } else if value >= Self::FAIR_THRESHOLD {
            ScoreLabel::Fair
        } else {
            ScoreLabel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Poor => "Poor",
            ScoreLabel::Fair => "Fair",
            ScoreLabel::Good => "Good",
            ScoreLabel::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Output of the scoring engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeScore {
    /// 0..=100
    pub value: u8,
    pub label: ScoreLabel,
}

impl CompositeScore {
    /// Build a score from a raw value, clamping to 100 and deriving the label
    pub fn from_value(value: u8) -> Self {
        let value = value.min(100);
        Self {
            value,
            label: ScoreLabel::from_value(value),
        }
    }
}

impl fmt::Display for CompositeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100 ({})", self.value, self.label)
    }
}
