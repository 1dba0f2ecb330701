//! Signal providers
//!
//! Stand-ins for credential-strength analysis, breach lookups and 2FA audits.
//! Anything that emits signals inside their domains can replace them.

use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scorecard_core::config::{ProviderConfig, ProviderKind};
use scorecard_core::{BreachRecord, ScorecardError, SignalSet, UserKey, breach_catalog};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

/// Provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Provider misconfigured: {0}")]
    Misconfigured(String),

    #[error(transparent)]
    InvalidSignals(#[from] ScorecardError),
}

/// Source of the three raw signals for a user
#[async_trait]
pub trait SignalProvider: Send + Sync {
    async fn collect(&self, user: &UserKey) -> Result<SignalSet, ProviderError>;

    /// Provider name, for logs
    fn name(&self) -> &str;
}

/// Source of breach records for an email address
#[async_trait]
pub trait BreachLookup: Send + Sync {
    async fn lookup(&self, email: &str) -> Result<Vec<BreachRecord>, ProviderError>;

    fn name(&self) -> &str;
}

/// Source of how many common services already have 2FA turned on
#[async_trait]
pub trait TwoFaAudit: Send + Sync {
    async fn enabled_services(&self, user: &UserKey, enabled: bool)
    -> Result<usize, ProviderError>;

    fn name(&self) -> &str;
}

/// Seeded or entropy-backed RNG shared behind a lock
#[derive(Debug)]
struct SharedRng(Mutex<ChaCha8Rng>);

impl SharedRng {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self(Mutex::new(rng))
    }

    fn with<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> Result<T, ProviderError> {
        let mut rng = self
            .0
            .lock()
            .map_err(|e| ProviderError::Unavailable(format!("rng lock poisoned: {}", e)))?;
        Ok(f(&mut rng))
    }
}

/// Simulated provider.
///
/// Password score is uniform in [60, 100), breach count uniform in [0, 5)
/// and 2FA is enabled with probability 0.5.
#[derive(Debug)]
pub struct RandomSignalProvider {
    rng: SharedRng,
}

impl RandomSignalProvider {
    pub const PASSWORD_RANGE: std::ops::Range<i32> = 60..100;
    pub const BREACH_RANGE: std::ops::Range<i32> = 0..5;
    pub const TWO_FA_PROBABILITY: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            rng: SharedRng::new(None),
        }
    }

    /// Reproducible provider
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SharedRng::new(Some(seed)),
        }
    }
}

impl Default for RandomSignalProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalProvider for RandomSignalProvider {
    async fn collect(&self, user: &UserKey) -> Result<SignalSet, ProviderError> {
        let signals = self.rng.with(|rng| {
            SignalSet::new(
                rng.gen_range(Self::PASSWORD_RANGE),
                rng.gen_range(Self::BREACH_RANGE),
                rng.gen_bool(Self::TWO_FA_PROBABILITY),
            )
        })?;
        debug!(%user, ?signals, "Simulated signals");
        Ok(signals)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Provider returning the same signals every time
#[derive(Debug, Clone, Copy)]
pub struct FixedSignalProvider {
    signals: SignalSet,
}

impl FixedSignalProvider {
    pub fn new(signals: SignalSet) -> Self {
        Self { signals }
    }
}

#[async_trait]
impl SignalProvider for FixedSignalProvider {
    async fn collect(&self, _user: &UserKey) -> Result<SignalSet, ProviderError> {
        Ok(self.signals)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Simulated breach lookup over the built-in catalog.
///
/// Reports the first `n` catalog entries with `n` uniform in [0, 3).
#[derive(Debug)]
pub struct CatalogBreachLookup {
    rng: SharedRng,
    catalog: Vec<BreachRecord>,
}

impl CatalogBreachLookup {
    pub const MAX_FOUND: usize = 3;

    pub fn new() -> Self {
        Self {
            rng: SharedRng::new(None),
            catalog: breach_catalog(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SharedRng::new(Some(seed)),
            catalog: breach_catalog(),
        }
    }
}

impl Default for CatalogBreachLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BreachLookup for CatalogBreachLookup {
    async fn lookup(&self, email: &str) -> Result<Vec<BreachRecord>, ProviderError> {
        let found = self.rng.with(|rng| rng.gen_range(0..Self::MAX_FOUND))?;
        debug!(email, found, "Simulated breach lookup");
        Ok(self.catalog.iter().take(found).cloned().collect())
    }

    fn name(&self) -> &str {
        "catalog"
    }
}

/// Breach lookup with a predetermined result
#[derive(Debug, Clone, Default)]
pub struct StaticBreachLookup {
    breaches: Vec<BreachRecord>,
}

impl StaticBreachLookup {
    pub fn new(breaches: Vec<BreachRecord>) -> Self {
        Self { breaches }
    }
}

#[async_trait]
impl BreachLookup for StaticBreachLookup {
    async fn lookup(&self, _email: &str) -> Result<Vec<BreachRecord>, ProviderError> {
        Ok(self.breaches.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Simulated 2FA audit.
///
/// Reports 2 to 5 protected services when 2FA is on and a single one
/// otherwise.
#[derive(Debug)]
pub struct RandomTwoFaAudit {
    rng: SharedRng,
}

impl RandomTwoFaAudit {
    pub const ENABLED_RANGE: std::ops::RangeInclusive<usize> = 2..=5;
    pub const DISABLED_SERVICES: usize = 1;

    pub fn new() -> Self {
        Self {
            rng: SharedRng::new(None),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SharedRng::new(Some(seed)),
        }
    }
}

impl Default for RandomTwoFaAudit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TwoFaAudit for RandomTwoFaAudit {
    async fn enabled_services(
        &self,
        user: &UserKey,
        enabled: bool,
    ) -> Result<usize, ProviderError> {
        let services = if enabled {
            self.rng.with(|rng| rng.gen_range(Self::ENABLED_RANGE))?
        } else {
            Self::DISABLED_SERVICES
        };
        debug!(%user, enabled, services, "Simulated 2FA audit");
        Ok(services)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Build the signal provider selected by configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn SignalProvider>, ProviderError> {
    match config.kind {
        ProviderKind::Random => Ok(match config.seed {
            Some(seed) => Arc::new(RandomSignalProvider::seeded(seed)),
            None => Arc::new(RandomSignalProvider::new()),
        }),
        ProviderKind::Fixed => {
            let signals = config.fixed.ok_or_else(|| {
                ProviderError::Misconfigured("fixed provider requires signal values".into())
            })?;
            signals.validate()?;
            Ok(Arc::new(FixedSignalProvider::new(signals)))
        }
    }
}

/// Build the breach lookup matching the provider configuration
pub fn create_breach_lookup(config: &ProviderConfig) -> Arc<dyn BreachLookup> {
    match config.seed {
        Some(seed) => Arc::new(CatalogBreachLookup::seeded(seed)),
        None => Arc::new(CatalogBreachLookup::new()),
    }
}

/// Build the 2FA audit matching the provider configuration
pub fn create_two_fa_audit(config: &ProviderConfig) -> Arc<dyn TwoFaAudit> {
    match config.seed {
        Some(seed) => Arc::new(RandomTwoFaAudit::seeded(seed)),
        None => Arc::new(RandomTwoFaAudit::new()),
    }
}
