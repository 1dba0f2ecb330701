//! Advisory recommendations and the shared priority scale

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Priority shared by recommendations and task items (Higher = more urgent)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// What a recommendation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationTopic {
    Password,
    Breach,
    TwoFa,
    General,
    /// Informational, nothing to act on
    None,
}

impl RecommendationTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationTopic::Password => "password",
            RecommendationTopic::Breach => "breach",
            RecommendationTopic::TwoFa => "twoFa",
            RecommendationTopic::General => "general",
            RecommendationTopic::None => "none",
        }
    }
}

impl fmt::Display for RecommendationTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Advisory text surfaced to the user; not user-actionable state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub topic: RecommendationTopic,
    /// `None` for informational recommendations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub title: String,
    pub description: String,
}

impl Recommendation {
    pub fn new(
        topic: RecommendationTopic,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            topic,
            priority: Some(priority),
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn informational(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            topic: RecommendationTopic::None,
            priority: None,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_informational(&self) -> bool {
        self.priority.is_none()
    }
}
