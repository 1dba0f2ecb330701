//! Breach records and the built-in breach catalog

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreachSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for BreachSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BreachSeverity::Low => "low",
            BreachSeverity::Medium => "medium",
            BreachSeverity::High => "high",
            BreachSeverity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// A publicly known data breach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachRecord {
    pub name: String,
    /// ISO-8601 disclosure date (YYYY-MM-DD)
    pub date: String,
    pub compromised_accounts: u64,
    pub data_types: Vec<String>,
    pub severity: BreachSeverity,
    pub description: String,
}

impl BreachRecord {
    pub fn disclosed_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

fn record(
    name: &str,
    date: &str,
    compromised_accounts: u64,
    data_types: &[&str],
    severity: BreachSeverity,
    description: &str,
) -> BreachRecord {
    BreachRecord {
        name: name.to_string(),
        date: date.to_string(),
        compromised_accounts,
        data_types: data_types.iter().map(|s| s.to_string()).collect(),
        severity,
        description: description.to_string(),
    }
}

/// Known breaches, most recent first
pub fn breach_catalog() -> Vec<BreachRecord> {
    vec![
        record(
            "LinkedIn",
            "2021-06-01",
            700_000_000,
            &["Email addresses", "Phone numbers", "Full names"],
            BreachSeverity::High,
            "LinkedIn data breach exposed personal information of millions of users",
        ),
        record(
            "Facebook",
            "2021-04-01",
            530_000_000,
            &["Email addresses", "Phone numbers", "Full names", "Birthdates"],
            BreachSeverity::High,
            "Facebook scraped data leak affected over half a billion users",
        ),
        record(
            "Adobe",
            "2013-10-01",
            153_000_000,
            &["Email addresses", "Passwords", "Credit card numbers"],
            BreachSeverity::Critical,
            "Adobe breach included customer data, source code, and financial information",
        ),
    ]
}

/// Kind of follow-up a breach advisory asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    Good,
    Urgent,
    Security,
    Monitoring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachAdvisory {
    pub kind: AdvisoryKind,
    pub title: String,
    pub description: String,
}

/// Result of looking an email address up in the breach catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachReport {
    pub email: String,
    pub breach_count: usize,
    pub breaches: Vec<BreachRecord>,
    pub last_checked: DateTime<Utc>,
    pub advisories: Vec<BreachAdvisory>,
}

/// Format an account count compactly, e.g. `700.0M`
pub fn format_compact_count(count: u64) -> String {
    let n = count as f64;
    if count >= 1_000_000_000 {
        format!("{:.1}B", n / 1_000_000_000.0)
    } else if count >= 1_000_000 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        count.to_string()
    }
}
