//! Scorecard Runtime - scan execution
//!
//! Responsibilities:
//! - Signal providers (simulated and fixed)
//! - Breach lookups and 2FA audits
//! - Scan orchestration and persistence
//!
//! Architecture:
//! - provider: pluggable signal, breach and 2FA sources
//! - executor: Provider -> Engine -> Storage pipeline

pub mod executor;
pub mod provider;

pub use executor::{Executor, ScanContext, ScanError, ScanReport};
pub use provider::{
    BreachLookup, CatalogBreachLookup, FixedSignalProvider, ProviderError, RandomSignalProvider,
    RandomTwoFaAudit, SignalProvider, StaticBreachLookup, TwoFaAudit, create_breach_lookup,
    create_provider, create_two_fa_audit,
};
pub use scorecard_storage::{MemoryStorage, SharedStorage};
