//! Remediation task items and their persisted form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

use crate::recommendation::Priority;
use crate::scan::{ScanId, UserKey};

/// Area of security hygiene a task addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TaskCategory {
    Password,
    TwoFa,
    Breach,
    #[default]
    General,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Password => "password",
            TaskCategory::TwoFa => "twoFa",
            TaskCategory::Breach => "breach",
            TaskCategory::General => "general",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "password" => Ok(TaskCategory::Password),
            "twofa" | "2fa" => Ok(TaskCategory::TwoFa),
            "breach" => Ok(TaskCategory::Breach),
            "general" => Ok(TaskCategory::General),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

/// Actionable to-do produced by the task generator.
///
/// `id` is the 1-based position within the generated batch; it is only
/// unique inside that batch. Storage assigns a [`TodoId`] on persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: TaskCategory,
    pub completed: bool,
}

impl TaskItem {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        category: TaskCategory,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            priority,
            category,
            completed: false,
        }
    }
}

/// Unique identifier for a persisted todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TodoId(pub Ulid);

impl TodoId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s.trim())
            .map(TodoId)
            .map_err(|e| format!("invalid todo id '{}': {}", s, e))
    }
}

/// A task item owned by one user, as held by storage.
///
/// Only `completed` and `updated_at` change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityTodo {
    pub id: TodoId,
    pub user: UserKey,
    /// Scan that generated this todo; `None` for manually created ones
    pub scan_id: Option<ScanId>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: TaskCategory,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SecurityTodo {
    /// Persisted form of an engine task item
    pub fn from_task(id: TodoId, user: UserKey, scan_id: ScanId, item: &TaskItem) -> Self {
        Self {
            id,
            user,
            scan_id: Some(scan_id),
            title: item.title.clone(),
            description: item.description.clone(),
            priority: item.priority,
            category: item.category,
            completed: item.completed,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn from_new(id: TodoId, new: NewTodo) -> Self {
        Self {
            id,
            user: new.user,
            scan_id: None,
            title: new.title,
            description: new.description,
            priority: new.priority,
            category: new.category,
            completed: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Request to create a todo by hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub user: UserKey,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: TaskCategory,
}

impl NewTodo {
    /// Priority defaults to medium, category to general
    pub fn new(user: UserKey, title: impl Into<String>) -> Self {
        Self {
            user,
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            category: TaskCategory::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }
}
