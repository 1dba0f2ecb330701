//! Recommendation rules
//!
//! Each rule is checked independently. Emission order is fixed (password,
//! breach, 2FA, general) and is not re-sorted by priority.

use scorecard_core::{CompositeScore, Priority, Recommendation, RecommendationTopic, SignalSet};

/// Password scores below this get a recommendation
pub const PASSWORD_HEALTHY_THRESHOLD: i32 = 80;
/// Password scores below this are high priority
pub const PASSWORD_WEAK_THRESHOLD: i32 = 60;
/// Breach counts above this are high priority
pub const BREACH_ESCALATION_COUNT: i32 = 2;
/// Composite scores below this get the general recommendation
pub const GENERAL_IMPROVEMENT_THRESHOLD: u8 = 60;

pub(crate) fn password_priority(signals: &SignalSet) -> Priority {
    if signals.password_score < PASSWORD_WEAK_THRESHOLD {
        Priority::High
    } else {
        Priority::Medium
    }
}

pub(crate) fn breach_priority(signals: &SignalSet) -> Priority {
    if signals.breach_count > BREACH_ESCALATION_COUNT {
        Priority::High
    } else {
        Priority::Medium
    }
}

pub(crate) fn derive(score: &CompositeScore, signals: &SignalSet) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if signals.password_score < PASSWORD_HEALTHY_THRESHOLD {
        recs.push(Recommendation::new(
            RecommendationTopic::Password,
            password_priority(signals),
            "Improve Password Security",
            "Some passwords are weak or may be reused. Consider using a password manager.",
        ));
    }

    if signals.breach_count > 0 {
        recs.push(Recommendation::new(
            RecommendationTopic::Breach,
            breach_priority(signals),
            "Address Data Breaches",
            format!(
                "{} potential breach(es) found. Change passwords for affected accounts.",
                signals.breach_count
            ),
        ));
    }

    if !signals.two_fa_enabled {
        recs.push(Recommendation::new(
            RecommendationTopic::TwoFa,
            Priority::High,
            "Enable Two-Factor Authentication",
            "2FA adds an extra layer of security to protect your accounts.",
        ));
    }

    if score.value < GENERAL_IMPROVEMENT_THRESHOLD {
        recs.push(Recommendation::new(
            RecommendationTopic::General,
            Priority::Medium,
            "Overall Security Improvement Needed",
            "Your security score is below average. Focus on the high-priority items first.",
        ));
    }

    if recs.is_empty() {
        recs.push(Recommendation::informational(
            "No Action Needed",
            "Your passwords, breach exposure and 2FA setup all look healthy.",
        ));
    }

    recs
}
