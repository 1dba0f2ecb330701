//! Scan records and the user scope they belong to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::recommendation::Recommendation;
use crate::score::CompositeScore;
use crate::signal::SignalSet;

/// Fallback user key when none is supplied
pub const DEFAULT_USER: &str = "default-user";

/// Opaque user identifier scoping scans and todos
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(pub String);

impl UserKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserKey {
    fn default() -> Self {
        Self(DEFAULT_USER.to_string())
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Unique identifier for a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(pub Uuid);

impl ScanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One completed scan, as kept in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: ScanId,
    pub user: UserKey,
    pub signals: SignalSet,
    pub score: CompositeScore,
    pub recommendations: Vec<Recommendation>,
    pub email_analyzed: bool,
    pub breach_check_done: bool,
    pub two_fa_checked: bool,
    pub created_at: DateTime<Utc>,
}

impl ScanRecord {
    pub fn new(
        user: UserKey,
        signals: SignalSet,
        score: CompositeScore,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            id: ScanId::new(),
            user,
            signals,
            score,
            recommendations,
            email_analyzed: true,
            breach_check_done: true,
            two_fa_checked: true,
            created_at: Utc::now(),
        }
    }
}
