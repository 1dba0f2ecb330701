//! Executor - scan orchestration
//!
//! Responsibilities:
//! - Pull signals from the signal provider
//! - Run them through the posture engine
//! - Persist the scan record and its task batch
//! - Serve history, todo and breach-check requests

use chrono::Utc;
use scorecard_core::{
    BreachReport, NewTodo, ScanRecord, ScorecardConfig, ScorecardError, SecurityTodo, SignalSet,
    TodoId, UserKey,
};
use scorecard_decision::analysis::{TwoFaCoverage, assess_two_fa, breach_advisories};
use scorecard_decision::{Assessment, PostureEngine, WeightedPostureEngine};
use scorecard_storage::{SharedStorage, StorageError, create_memory_storage, create_storage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::provider::{
    BreachLookup, CatalogBreachLookup, ProviderError, RandomSignalProvider, RandomTwoFaAudit,
    SignalProvider, TwoFaAudit, create_breach_lookup, create_provider, create_two_fa_audit,
};

/// Executor errors
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Signal provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScorecardError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Execution context: the collaborators a scan runs against
#[derive(Clone)]
pub struct ScanContext {
    /// Storage backend
    pub storage: SharedStorage,

    /// Posture engine
    pub engine: Arc<dyn PostureEngine>,

    /// Signal provider
    pub provider: Arc<dyn SignalProvider>,

    /// Breach lookup
    pub breach_lookup: Arc<dyn BreachLookup>,

    /// 2FA audit
    pub two_fa_audit: Arc<dyn TwoFaAudit>,
}

impl std::fmt::Debug for ScanContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanContext")
            .field("provider", &self.provider.name())
            .field("breach_lookup", &self.breach_lookup.name())
            .field("two_fa_audit", &self.two_fa_audit.name())
            .finish_non_exhaustive()
    }
}

impl Default for ScanContext {
    fn default() -> Self {
        Self {
            storage: create_memory_storage(),
            engine: Arc::new(WeightedPostureEngine::new()),
            provider: Arc::new(RandomSignalProvider::new()),
            breach_lookup: Arc::new(CatalogBreachLookup::new()),
            two_fa_audit: Arc::new(RandomTwoFaAudit::new()),
        }
    }
}

impl ScanContext {
    /// Wire collaborators from configuration
    pub async fn from_config(config: &ScorecardConfig) -> Result<Self> {
        Ok(Self {
            storage: create_storage(&config.storage).await?,
            engine: Arc::new(WeightedPostureEngine::new()),
            provider: create_provider(&config.provider)?,
            breach_lookup: create_breach_lookup(&config.provider),
            two_fa_audit: create_two_fa_audit(&config.provider),
        })
    }

    pub fn with_storage(mut self, storage: SharedStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn SignalProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_breach_lookup(mut self, lookup: Arc<dyn BreachLookup>) -> Self {
        self.breach_lookup = lookup;
        self
    }

    pub fn with_two_fa_audit(mut self, audit: Arc<dyn TwoFaAudit>) -> Self {
        self.two_fa_audit = audit;
        self
    }
}

/// Outcome of one persisted scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan: ScanRecord,
    /// Todos appended by this scan, in generation order
    pub todos: Vec<SecurityTodo>,
}

/// Executor
#[derive(Debug, Clone)]
pub struct Executor {
    context: Arc<ScanContext>,
}

impl Executor {
    pub fn new(context: ScanContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    pub fn context(&self) -> &ScanContext {
        &self.context
    }

    /// Evaluate signals without persisting anything
    pub fn evaluate(&self, signals: &SignalSet) -> Result<Assessment> {
        Ok(self.context.engine.evaluate(signals)?)
    }

    /// Collect signals for `user` and run a full scan
    pub async fn run_scan(&self, user: &UserKey) -> Result<ScanReport> {
        info!(%user, provider = self.context.provider.name(), "Starting security scan");
        let signals = self.context.provider.collect(user).await?;
        self.run_scan_with(user, signals).await
    }

    /// Run a full scan on already collected signals.
    ///
    /// Each call appends a new task batch; earlier batches are kept.
    pub async fn run_scan_with(&self, user: &UserKey, signals: SignalSet) -> Result<ScanReport> {
        let assessment = self.context.engine.evaluate(&signals).map_err(|e| {
            warn!(%user, ?signals, "Rejected signals: {}", e);
            e
        })?;

        let scan = ScanRecord::new(
            user.clone(),
            signals,
            assessment.score,
            assessment.recommendations,
        );
        let todos = self
            .context
            .storage
            .record_scan(&scan, &assessment.tasks)
            .await?;

        info!(
            %user,
            scan_id = %scan.id,
            score = scan.score.value,
            label = %scan.score.label,
            todos = todos.len(),
            "Security scan complete"
        );
        Ok(ScanReport { scan, todos })
    }

    pub async fn latest_scan(&self, user: &UserKey) -> Result<Option<ScanRecord>> {
        Ok(self.context.storage.latest_scan(user).await?)
    }

    pub async fn scan_history(&self, user: &UserKey) -> Result<Vec<ScanRecord>> {
        Ok(self.context.storage.list_scans(user).await?)
    }

    pub async fn list_todos(&self, user: &UserKey) -> Result<Vec<SecurityTodo>> {
        Ok(self.context.storage.list_todos(user).await?)
    }

    pub async fn add_todo(&self, new: NewTodo) -> Result<SecurityTodo> {
        let todo = self.context.storage.create_todo(new).await?;
        debug!(id = %todo.id, user = %todo.user, "Created todo");
        Ok(todo)
    }

    pub async fn set_todo_completed(&self, id: &TodoId, completed: bool) -> Result<SecurityTodo> {
        let todo = self.context.storage.set_todo_completed(id, completed).await?;
        debug!(%id, completed, "Updated todo");
        Ok(todo)
    }

    pub async fn toggle_todo(&self, id: &TodoId) -> Result<SecurityTodo> {
        let todo = self.context.storage.toggle_todo(id).await?;
        debug!(%id, completed = todo.completed, "Toggled todo");
        Ok(todo)
    }

    /// Look an email address up in the breach source
    pub async fn breach_check(&self, email: &str) -> Result<BreachReport> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ScanError::InvalidEmail("email is required".into()));
        }
        if !email.contains('@') {
            return Err(ScanError::InvalidEmail(format!(
                "'{}' is not an email address",
                email
            )));
        }

        let breaches = self.context.breach_lookup.lookup(email).await?;
        info!(
            lookup = self.context.breach_lookup.name(),
            found = breaches.len(),
            "Breach check complete"
        );

        Ok(BreachReport {
            email: email.to_string(),
            breach_count: breaches.len(),
            advisories: breach_advisories(breaches.len()),
            breaches,
            last_checked: Utc::now(),
        })
    }

    /// 2FA coverage report.
    ///
    /// `enabled` falls back to the latest scan's signal (off without scans);
    /// `services` falls back to the 2FA audit.
    pub async fn two_fa_coverage(
        &self,
        user: &UserKey,
        enabled: Option<bool>,
        services: Option<usize>,
    ) -> Result<TwoFaCoverage> {
        let enabled = match enabled {
            Some(enabled) => enabled,
            None => self
                .latest_scan(user)
                .await?
                .is_some_and(|scan| scan.signals.two_fa_enabled),
        };
        let services = match services {
            Some(services) => services,
            None => self.context.two_fa_audit.enabled_services(user, enabled).await?,
        };
        if enabled && services == 0 {
            return Err(ScanError::InvalidRequest(
                "2FA is enabled but no protected services were given".into(),
            ));
        }

        Ok(assess_two_fa(enabled, services))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(ScanContext::default())
    }
}
