//! In-memory storage implementation
//!
//! Keeps scan history and todos for the lifetime of the process

use async_trait::async_trait;
use chrono::Utc;
use scorecard_core::{NewTodo, ScanId, ScanRecord, SecurityTodo, TaskItem, TodoId, UserKey};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::trait_::{Result, SharedStorage, Storage, StorageError, TodoIdGenerator, sort_todos};

#[derive(Debug, Default)]
struct MemoryState {
    /// Insertion order == creation order
    scans: Vec<ScanRecord>,
    todos: Vec<SecurityTodo>,
}

/// In-memory storage implementation
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
    ids: TodoIdGenerator,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|e| StorageError::LockFailed(e.to_string()))
    }

    fn update_todo<F>(&self, id: &TodoId, update: F) -> Result<SecurityTodo>
    where
        F: FnOnce(&mut SecurityTodo),
    {
        let mut state = self.state()?;
        let todo = state
            .todos
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| StorageError::NotFound(format!("todo {}", id)))?;
        update(todo);
        todo.updated_at = Some(Utc::now());
        Ok(todo.clone())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save_scan(&self, scan: &ScanRecord) -> Result<()> {
        let mut state = self.state()?;
        state.scans.push(scan.clone());
        Ok(())
    }

    async fn latest_scan(&self, user: &UserKey) -> Result<Option<ScanRecord>> {
        let state = self.state()?;
        Ok(state.scans.iter().rev().find(|s| s.user == *user).cloned())
    }

    async fn list_scans(&self, user: &UserKey) -> Result<Vec<ScanRecord>> {
        let state = self.state()?;
        Ok(state
            .scans
            .iter()
            .rev()
            .filter(|s| s.user == *user)
            .cloned()
            .collect())
    }

    async fn create_todos(
        &self,
        user: &UserKey,
        scan_id: ScanId,
        items: &[TaskItem],
    ) -> Result<Vec<SecurityTodo>> {
        let mut state = self.state()?;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let todo = SecurityTodo::from_task(self.ids.next_id()?, user.clone(), scan_id, item);
            state.todos.push(todo.clone());
            created.push(todo);
        }
        Ok(created)
    }

    async fn record_scan(
        &self,
        scan: &ScanRecord,
        items: &[TaskItem],
    ) -> Result<Vec<SecurityTodo>> {
        let mut state = self.state()?;
        let created = items
            .iter()
            .map(|item| {
                self.ids
                    .next_id()
                    .map(|id| SecurityTodo::from_task(id, scan.user.clone(), scan.id, item))
            })
            .collect::<Result<Vec<_>>>()?;
        state.todos.extend_from_slice(&created);
        state.scans.push(scan.clone());
        Ok(created)
    }

    async fn create_todo(&self, new: NewTodo) -> Result<SecurityTodo> {
        let mut state = self.state()?;
        let todo = SecurityTodo::from_new(self.ids.next_id()?, new);
        state.todos.push(todo.clone());
        Ok(todo)
    }

    async fn list_todos(&self, user: &UserKey) -> Result<Vec<SecurityTodo>> {
        let state = self.state()?;
        let mut todos: Vec<SecurityTodo> = state
            .todos
            .iter()
            .filter(|t| t.user == *user)
            .cloned()
            .collect();
        sort_todos(&mut todos);
        Ok(todos)
    }

    async fn get_todo(&self, id: &TodoId) -> Result<Option<SecurityTodo>> {
        let state = self.state()?;
        Ok(state.todos.iter().find(|t| t.id == *id).cloned())
    }

    async fn set_todo_completed(&self, id: &TodoId, completed: bool) -> Result<SecurityTodo> {
        self.update_todo(id, |todo| todo.completed = completed)
    }

    async fn toggle_todo(&self, id: &TodoId) -> Result<SecurityTodo> {
        self.update_todo(id, |todo| todo.completed = !todo.completed)
    }
}

/// Create a new shared in-memory storage
pub fn create_memory_storage() -> SharedStorage {
    Arc::new(MemoryStorage::new())
}
