//! Scorecard configuration
//!
//! Supports a YAML configuration file and environment variable overrides

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scan::DEFAULT_USER;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = ".scorecard/config.yaml";

pub const ENV_USER: &str = "SCORECARD_USER";
pub const ENV_STORAGE: &str = "SCORECARD_STORAGE";
pub const ENV_DB_PATH: &str = "SCORECARD_DB_PATH";
pub const ENV_SEED: &str = "SCORECARD_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardConfig {
    /// User key used when a command names none
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Signal provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

impl Default for ScorecardConfig {
    fn default() -> Self {
        Self {
            default_user: default_user(),
            storage: StorageConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Memory,
    Json,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage type
    #[serde(default)]
    pub storage_type: StorageType,

    /// Root directory of the JSON store
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(".scorecard/storage")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::default(),
            db_path: default_db_path(),
        }
    }
}

/// Signal provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Simulated signals from a pseudo-random generator
    #[default]
    Random,
    /// Signals taken verbatim from `fixed`
    Fixed,
}

/// Signal provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    /// Seed for reproducible random scans
    #[serde(default)]
    pub seed: Option<u64>,

    /// Values used by the fixed provider
    #[serde(default)]
    pub fixed: Option<crate::signal::SignalSet>,
}

impl ScorecardConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: ScorecardConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load `path` if given, else the default file when present, else defaults.
    /// Environment overrides are applied last.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::load(default_path)?
                } else {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(user) = lookup(ENV_USER).filter(|u| !u.trim().is_empty()) {
            self.default_user = user;
        }
        if let Some(storage) = lookup(ENV_STORAGE) {
            self.storage.storage_type = match storage.trim().to_lowercase().as_str() {
                "memory" => StorageType::Memory,
                "json" => StorageType::Json,
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be 'memory' or 'json', got '{}'",
                        ENV_STORAGE, other
                    )));
                }
            };
        }
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.storage.db_path = PathBuf::from(path);
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed.trim().parse::<u64>().map_err(|e| {
                ConfigError::Invalid(format!("{} must be an integer: {}", ENV_SEED, e))
            })?;
            self.provider.seed = Some(seed);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_user.trim().is_empty() {
            return Err(ConfigError::Invalid("default_user must not be empty".into()));
        }
        if self.provider.kind == ProviderKind::Fixed {
            match &self.provider.fixed {
                None => {
                    return Err(ConfigError::Invalid(
                        "provider.fixed is required when provider.kind is 'fixed'".into(),
                    ));
                }
                Some(signals) => signals
                    .validate()
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ScorecardConfig::default();
        assert_eq!(config.default_user, "default-user");
        assert_eq!(config.storage.storage_type, StorageType::Memory);
        assert_eq!(config.provider.kind, ProviderKind::Random);
        assert!(config.provider.seed.is_none());
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = r#"
default_user: alice
storage:
  storage_type: json
  db_path: /tmp/scorecard
"#;
        let config = ScorecardConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.default_user, "alice");
        assert_eq!(config.storage.storage_type, StorageType::Json);
        assert_eq!(config.storage.db_path, PathBuf::from("/tmp/scorecard"));
        assert_eq!(config.provider, ProviderConfig::default());
    }

    #[test]
    fn test_from_yaml_fixed_provider() {
        let yaml = r#"
provider:
  kind: fixed
  fixed:
    passwordScore: 72
    breachCount: 2
    twoFaEnabled: false
"#;
        let config = ScorecardConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Fixed);
        let fixed = config.provider.fixed.unwrap();
        assert_eq!(fixed.password_score, 72);
        assert_eq!(fixed.breach_count, 2);
        assert!(!fixed.two_fa_enabled);
    }

    #[test]
    fn test_fixed_provider_requires_signals() {
        let err = ScorecardConfig::from_yaml("provider:\n  kind: fixed\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_fixed_provider_rejects_out_of_domain() {
        let yaml = r#"
provider:
  kind: fixed
  fixed:
    passwordScore: 140
    breachCount: 0
    twoFaEnabled: true
"#;
        assert!(matches!(
            ScorecardConfig::from_yaml(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_USER, "bob"),
            (ENV_STORAGE, "JSON"),
            (ENV_DB_PATH, "/var/lib/scorecard"),
            (ENV_SEED, "42"),
        ]
        .into_iter()
        .collect();

        let mut config = ScorecardConfig::default();
        config
            .apply_env_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.default_user, "bob");
        assert_eq!(config.storage.storage_type, StorageType::Json);
        assert_eq!(config.storage.db_path, PathBuf::from("/var/lib/scorecard"));
        assert_eq!(config.provider.seed, Some(42));
    }

    #[test]
    fn test_env_override_bad_seed() {
        let mut config = ScorecardConfig::default();
        let err = config
            .apply_env_overrides(|k| (k == ENV_SEED).then(|| "abc".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_SEED));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "default_user: carol\n").unwrap();

        let config = ScorecardConfig::load(&path).unwrap();
        assert_eq!(config.default_user, "carol");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScorecardConfig::load(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
