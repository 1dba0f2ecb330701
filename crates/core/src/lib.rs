//! Scorecard Core - core data model
//!
//! Contains:
//! - Signal: raw inputs to scoring (password, breach, 2FA)
//! - Score: composite score and qualitative label
//! - Recommendation / TaskItem: engine outputs
//! - Scan / Todo: persisted records keyed by user
//! - Breach: breach records and the built-in catalog
//! - Config: YAML configuration with environment overrides

mod signal;
mod score;
mod recommendation;
mod task;
mod scan;
mod breach;
mod error;
pub mod config;

pub use signal::*;
pub use score::*;
pub use recommendation::*;
pub use task::*;
pub use scan::*;
pub use breach::*;
pub use error::*;
pub use config::{ConfigError, ScorecardConfig};
