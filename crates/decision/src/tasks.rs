//! Remediation task rules
//!
//! Signal-derived tasks come first in a fixed order (password, 2FA, breach),
//! followed by the two unconditional hygiene tasks.

use scorecard_core::{Priority, SignalSet, TaskCategory, TaskItem};

use crate::recommendations::{PASSWORD_HEALTHY_THRESHOLD, breach_priority, password_priority};

pub(crate) fn derive(signals: &SignalSet) -> Vec<TaskItem> {
    let mut drafts: Vec<(&str, &str, Priority, TaskCategory)> = Vec::with_capacity(5);

    if signals.password_score < PASSWORD_HEALTHY_THRESHOLD {
        drafts.push((
            "Change weak passwords",
            "Update passwords for accounts with weak or reused passwords",
            password_priority(signals),
            TaskCategory::Password,
        ));
    }

    if !signals.two_fa_enabled {
        drafts.push((
            "Enable 2FA on high-priority accounts",
            "Set up two-factor authentication on email, banking, and social media accounts",
            Priority::High,
            TaskCategory::TwoFa,
        ));
    }

    if signals.breach_count > 0 {
        drafts.push((
            "Review breach notifications",
            "Check and respond to any data breach alerts for your accounts",
            breach_priority(signals),
            TaskCategory::Breach,
        ));
    }

    drafts.push((
        "Set up password manager",
        "Install and configure a password manager to generate and store strong passwords",
        Priority::Medium,
        TaskCategory::Password,
    ));
    drafts.push((
        "Review account recovery options",
        "Update recovery email addresses and phone numbers for important accounts",
        Priority::Medium,
        TaskCategory::General,
    ));

    drafts
        .into_iter()
        .enumerate()
        .map(|(idx, (title, description, priority, category))| {
            TaskItem::new(idx as u32 + 1, title, description, priority, category)
        })
        .collect()
}
