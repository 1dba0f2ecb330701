//! Storage trait definition
//!
//! Abstract interface for scan history and todo persistence, keyed by user

use async_trait::async_trait;
use scorecard_core::{NewTodo, ScanId, ScanRecord, SecurityTodo, TaskItem, TodoId, UserKey};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use ulid::{Generator, Ulid};

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Lock failed: {0}")]
    LockFailed(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage trait for scans and todos
#[async_trait]
pub trait Storage: Send + Sync {
    /// Append a scan to the user's history
    async fn save_scan(&self, scan: &ScanRecord) -> Result<()>;

    /// Most recent scan for a user
    async fn latest_scan(&self, user: &UserKey) -> Result<Option<ScanRecord>>;

    /// All scans for a user, newest first
    async fn list_scans(&self, user: &UserKey) -> Result<Vec<ScanRecord>>;

    /// Persist a generated task batch; each item gets a fresh [`TodoId`]
    async fn create_todos(
        &self,
        user: &UserKey,
        scan_id: ScanId,
        items: &[TaskItem],
    ) -> Result<Vec<SecurityTodo>>;

    /// Persist a scan together with its task batch.
    ///
    /// The scan becomes visible only once the whole batch is stored; on
    /// error neither the scan nor any of its todos are listed.
    async fn record_scan(
        &self,
        scan: &ScanRecord,
        items: &[TaskItem],
    ) -> Result<Vec<SecurityTodo>>;

    /// Persist a manually created todo
    async fn create_todo(&self, new: NewTodo) -> Result<SecurityTodo>;

    /// Todos for a user, highest priority first, then oldest first
    async fn list_todos(&self, user: &UserKey) -> Result<Vec<SecurityTodo>>;

    async fn get_todo(&self, id: &TodoId) -> Result<Option<SecurityTodo>>;

    /// Set the completion flag; `NotFound` for unknown ids
    async fn set_todo_completed(&self, id: &TodoId, completed: bool) -> Result<SecurityTodo>;

    /// Flip the completion flag; `NotFound` for unknown ids
    async fn toggle_todo(&self, id: &TodoId) -> Result<SecurityTodo>;
}

/// Shared storage reference
pub type SharedStorage = Arc<dyn Storage>;

/// Canonical todo listing order: priority desc, created_at asc, id asc
pub fn sort_todos(todos: &mut [SecurityTodo]) {
    todos.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Newest-first scan ordering
pub fn sort_scans(scans: &mut [ScanRecord]) {
    scans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Monotonic ULID source so ids issued by one store sort in creation order
pub struct TodoIdGenerator {
    inner: Mutex<Generator>,
}

impl std::fmt::Debug for TodoIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoIdGenerator").finish_non_exhaustive()
    }
}

impl Default for TodoIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoIdGenerator {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Generator::new()),
        }
    }

    pub fn next_id(&self) -> Result<TodoId> {
        let mut generator = self
            .inner
            .lock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))?;
        // Overflow within one millisecond; fall back to a random ULID.
        let ulid = generator.generate().unwrap_or_else(|_| Ulid::new());
        Ok(TodoId(ulid))
    }
}
