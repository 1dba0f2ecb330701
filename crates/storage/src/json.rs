//! JSON file storage implementation
//!
//! Lightweight backend for the CLI: one pretty-printed JSON file per record
//! under `scans/` and `todos/`, mirrored in an in-memory cache.

use async_trait::async_trait;
use chrono::Utc;
use scorecard_core::{NewTodo, ScanId, ScanRecord, SecurityTodo, TaskItem, TodoId, UserKey};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::trait_::{Result, Storage, StorageError, TodoIdGenerator, sort_scans, sort_todos};

#[derive(Debug, Default)]
struct Cache {
    /// Oldest first
    scans: Vec<ScanRecord>,
    todos: Vec<SecurityTodo>,
}

/// JSON storage implementation
#[derive(Debug)]
pub struct JsonStorage {
    /// Storage root directory
    root: PathBuf,

    cache: RwLock<Cache>,

    /// Serializes writers so read-modify-write updates never interleave
    write_lock: tokio::sync::Mutex<()>,

    ids: TodoIdGenerator,
}

impl JsonStorage {
    /// Open (or create) a JSON store rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let scans_dir = root.join("scans");
        let todos_dir = root.join("todos");

        tokio::fs::create_dir_all(&scans_dir).await?;
        tokio::fs::create_dir_all(&todos_dir).await?;

        let mut scans: Vec<ScanRecord> = Self::load_dir(&scans_dir).await?;
        scans.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let todos: Vec<SecurityTodo> = Self::load_dir(&todos_dir).await?;

        tracing::debug!(
            root = %root.display(),
            scans = scans.len(),
            todos = todos.len(),
            "Opened JSON storage"
        );

        Ok(Self {
            root,
            cache: RwLock::new(Cache { scans, todos }),
            write_lock: tokio::sync::Mutex::new(()),
            ids: TodoIdGenerator::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every `*.json` record in a directory, skipping unreadable files
    async fn load_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
        let mut records = Vec::new();

        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }
            match Self::load_file(&path).await {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Failed to load {}: {}", path.display(), e),
            }
        }

        Ok(records)
    }

    async fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(StorageError::Serialize)
    }

    /// Write to a temp file, then rename over the target
    async fn write_atomic<T: Serialize>(path: &Path, record: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(record)?;
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &content).await?;
        tokio::fs::rename(&temp_path, path).await?;
        Ok(())
    }

    /// Remove files of a partially written batch
    async fn discard(paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = tokio::fs::remove_file(path).await {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }

    fn scan_path(&self, id: &ScanId) -> PathBuf {
        self.root.join("scans").join(format!("{}.json", id))
    }

    fn todo_path(&self, id: &TodoId) -> PathBuf {
        self.root.join("todos").join(format!("{}.json", id))
    }

    fn read_cache(&self) -> Result<RwLockReadGuard<'_, Cache>> {
        self.cache
            .read()
            .map_err(|e| StorageError::LockFailed(e.to_string()))
    }

    fn write_cache(&self) -> Result<RwLockWriteGuard<'_, Cache>> {
        self.cache
            .write()
            .map_err(|e| StorageError::LockFailed(e.to_string()))
    }

    async fn persist_todos(&self, todos: &[SecurityTodo]) -> Result<()> {
        for todo in todos {
            Self::write_atomic(&self.todo_path(&todo.id), todo).await?;
        }
        let mut cache = self.write_cache()?;
        cache.todos.extend_from_slice(todos);
        Ok(())
    }

    async fn update_todo<F>(&self, id: &TodoId, update: F) -> Result<SecurityTodo>
    where
        F: FnOnce(&mut SecurityTodo) + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut todo = self
            .read_cache()?
            .todos
            .iter()
            .find(|t| t.id == *id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("todo {}", id)))?;
        update(&mut todo);
        todo.updated_at = Some(Utc::now());

        Self::write_atomic(&self.todo_path(id), &todo).await?;

        let mut cache = self.write_cache()?;
        if let Some(slot) = cache.todos.iter_mut().find(|t| t.id == *id) {
            *slot = todo.clone();
        }
        Ok(todo)
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn save_scan(&self, scan: &ScanRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        Self::write_atomic(&self.scan_path(&scan.id), scan).await?;
        self.write_cache()?.scans.push(scan.clone());
        Ok(())
    }

    async fn latest_scan(&self, user: &UserKey) -> Result<Option<ScanRecord>> {
        let cache = self.read_cache()?;
        Ok(cache.scans.iter().rev().find(|s| s.user == *user).cloned())
    }

    async fn list_scans(&self, user: &UserKey) -> Result<Vec<ScanRecord>> {
        let cache = self.read_cache()?;
        let mut scans: Vec<ScanRecord> = cache
            .scans
            .iter()
            .rev()
            .filter(|s| s.user == *user)
            .cloned()
            .collect();
        sort_scans(&mut scans);
        Ok(scans)
    }

    async fn create_todos(
        &self,
        user: &UserKey,
        scan_id: ScanId,
        items: &[TaskItem],
    ) -> Result<Vec<SecurityTodo>> {
        let _guard = self.write_lock.lock().await;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            created.push(SecurityTodo::from_task(
                self.ids.next_id()?,
                user.clone(),
                scan_id,
                item,
            ));
        }
        self.persist_todos(&created).await?;
        Ok(created)
    }

    async fn record_scan(
        &self,
        scan: &ScanRecord,
        items: &[TaskItem],
    ) -> Result<Vec<SecurityTodo>> {
        let _guard = self.write_lock.lock().await;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            created.push(SecurityTodo::from_task(
                self.ids.next_id()?,
                scan.user.clone(),
                scan.id,
                item,
            ));
        }

        // Todo files first, scan file last: a scan on disk always has its batch
        let mut written = Vec::with_capacity(created.len());
        for todo in &created {
            let path = self.todo_path(&todo.id);
            if let Err(e) = Self::write_atomic(&path, todo).await {
                Self::discard(&written).await;
                return Err(e);
            }
            written.push(path);
        }
        if let Err(e) = Self::write_atomic(&self.scan_path(&scan.id), scan).await {
            Self::discard(&written).await;
            return Err(e);
        }

        let mut cache = self.write_cache()?;
        cache.todos.extend_from_slice(&created);
        cache.scans.push(scan.clone());
        Ok(created)
    }

    async fn create_todo(&self, new: NewTodo) -> Result<SecurityTodo> {
        let _guard = self.write_lock.lock().await;
        let todo = SecurityTodo::from_new(self.ids.next_id()?, new);
        self.persist_todos(std::slice::from_ref(&todo)).await?;
        Ok(todo)
    }

    async fn list_todos(&self, user: &UserKey) -> Result<Vec<SecurityTodo>> {
        let cache = self.read_cache()?;
        let mut todos: Vec<SecurityTodo> = cache
            .todos
            .iter()
            .filter(|t| t.user == *user)
            .cloned()
            .collect();
        sort_todos(&mut todos);
        Ok(todos)
    }

    async fn get_todo(&self, id: &TodoId) -> Result<Option<SecurityTodo>> {
        let cache = self.read_cache()?;
        Ok(cache.todos.iter().find(|t| t.id == *id).cloned())
    }

    async fn set_todo_completed(&self, id: &TodoId, completed: bool) -> Result<SecurityTodo> {
        self.update_todo(id, |todo| todo.completed = completed).await
    }

    async fn toggle_todo(&self, id: &TodoId) -> Result<SecurityTodo> {
        self.update_todo(id, |todo| todo.completed = !todo.completed).await
    }
}
