//! Per-signal drill-down reports
//!
//! - Password analysis: strength band, issues, estimated distribution
//! - Breach advisories: follow-up steps for a breach lookup
//! - 2FA coverage: which common services still need 2FA

use scorecard_core::{
    AdvisoryKind, BreachAdvisory, Priority, Result, ScorecardError, MAX_PASSWORD_SCORE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PasswordStrength {
    Weak,
    Fair,
    Strong,
}

impl PasswordStrength {
    pub fn from_score(score: i32) -> Self {
        if score >= 80 {
            PasswordStrength::Strong
        } else if score >= 60 {
            PasswordStrength::Fair
        } else {
            PasswordStrength::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordIssue {
    pub severity: IssueSeverity,
    pub title: String,
    pub description: String,
}

/// Estimated share of passwords per health bucket, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDistribution {
    pub strong: u8,
    pub needs_improvement: u8,
    pub at_risk: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordAnalysis {
    pub score: i32,
    pub strength: PasswordStrength,
    pub issues: Vec<PasswordIssue>,
    pub distribution: PasswordDistribution,
}

fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Break a password-strength signal down into issues and buckets
pub fn analyze_password(score: i32) -> Result<PasswordAnalysis> {
    if !(0..=MAX_PASSWORD_SCORE).contains(&score) {
        return Err(ScorecardError::InvalidInput(format!(
            "password score must be within 0..={}, got {}",
            MAX_PASSWORD_SCORE, score
        )));
    }

    let mut issues = Vec::new();
    if score < 80 {
        issues.push(PasswordIssue {
            severity: IssueSeverity::Warning,
            title: "Password Strength".into(),
            description: "Some of your passwords may be weak or easily guessable".into(),
        });
    }
    if score < 60 {
        issues.push(PasswordIssue {
            severity: IssueSeverity::Error,
            title: "Password Reuse".into(),
            description: "You may be reusing passwords across multiple accounts".into(),
        });
    }
    if score < 40 {
        issues.push(PasswordIssue {
            severity: IssueSeverity::Error,
            title: "Common Passwords".into(),
            description: "You may be using common or dictionary-based passwords".into(),
        });
    }

    let s = f64::from(score);
    let weak_share = f64::from(MAX_PASSWORD_SCORE - score);
    Ok(PasswordAnalysis {
        score,
        strength: PasswordStrength::from_score(score),
        issues,
        distribution: PasswordDistribution {
            strong: percent(s * 0.8),
            needs_improvement: percent(weak_share * 0.6),
            at_risk: percent(weak_share * 0.4),
        },
    })
}

/// Follow-up steps after a breach lookup
pub fn breach_advisories(breach_count: usize) -> Vec<BreachAdvisory> {
    if breach_count == 0 {
        return vec![BreachAdvisory {
            kind: AdvisoryKind::Good,
            title: "No Breaches Found".into(),
            description: "Your email doesn't appear in any known major data breaches.".into(),
        }];
    }

    vec![
        BreachAdvisory {
            kind: AdvisoryKind::Urgent,
            title: "Change Passwords Immediately".into(),
            description:
                "Update passwords for all accounts associated with this email address.".into(),
        },
        BreachAdvisory {
            kind: AdvisoryKind::Security,
            title: "Enable Two-Factor Authentication".into(),
            description: "Add 2FA to all accounts that support it for extra protection.".into(),
        },
        BreachAdvisory {
            kind: AdvisoryKind::Monitoring,
            title: "Monitor Account Activity".into(),
            description: "Keep an eye on your accounts for any suspicious activity.".into(),
        },
    ]
}

/// A service commonly worth protecting with 2FA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFaService {
    pub name: String,
    pub category: String,
    pub setup_url: String,
    pub priority: Priority,
}

fn service(name: &str, category: &str, setup_url: &str, priority: Priority) -> TwoFaService {
    TwoFaService {
        name: name.into(),
        category: category.into(),
        setup_url: setup_url.into(),
        priority,
    }
}

/// Common services supporting 2FA
pub fn two_fa_services() -> Vec<TwoFaService> {
    vec![
        service("Google", "Email", "https://myaccount.google.com/security", Priority::High),
        service(
            "Microsoft",
            "Email/Productivity",
            "https://account.microsoft.com/security",
            Priority::High,
        ),
        service(
            "Apple",
            "Devices/Services",
            "https://appleid.apple.com/account/manage",
            Priority::High,
        ),
        service(
            "Facebook",
            "Social Media",
            "https://www.facebook.com/settings?tab=security",
            Priority::Medium,
        ),
        service(
            "Twitter/X",
            "Social Media",
            "https://twitter.com/settings/security",
            Priority::Medium,
        ),
        service(
            "Instagram",
            "Social Media",
            "https://www.instagram.com/accounts/security/",
            Priority::Medium,
        ),
        service(
            "LinkedIn",
            "Professional",
            "https://www.linkedin.com/psettings/security",
            Priority::Medium,
        ),
        service(
            "GitHub",
            "Development",
            "https://github.com/settings/security",
            Priority::High,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwoFaStatus {
    /// 2FA is on for some accounts
    Partial,
    NeedsSetup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFaCoverage {
    pub enabled: bool,
    pub status: TwoFaStatus,
    pub enabled_services: usize,
    pub total_services: usize,
    /// Percentage of catalog services with 2FA on
    pub coverage_percent: u8,
    /// Services to secure next, high priority first; empty when enabled
    pub services_to_secure: Vec<TwoFaService>,
}

/// Summarize 2FA coverage across the service catalog
pub fn assess_two_fa(enabled: bool, enabled_services: usize) -> TwoFaCoverage {
    let catalog = two_fa_services();
    let total = catalog.len();
    let enabled_services = enabled_services.min(total);
    let coverage_percent = if total == 0 {
        0
    } else {
        percent(enabled_services as f64 / total as f64 * 100.0)
    };

    let services_to_secure = if enabled {
        Vec::new()
    } else {
        let mut services = catalog;
        // stable: catalog order is kept within a priority
        services.sort_by(|a, b| b.priority.cmp(&a.priority));
        services
    };

    TwoFaCoverage {
        enabled,
        status: if enabled {
            TwoFaStatus::Partial
        } else {
            TwoFaStatus::NeedsSetup
        },
        enabled_services,
        total_services: total,
        coverage_percent,
        services_to_secure,
    }
}
