//! Configuration management for the credential store
//!
//! Every store carries its own [`StoreConfig`]; there is no process-wide
//! default location. Values come from an optional `config.toml` with
//! `CREDSTORE_*` environment overrides, falling back to [`Default`].

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::hashing;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "users.db";

/// Environment variables named `CREDSTORE_<KEY>` override file values.
const ENV_PREFIX: &str = "CREDSTORE";

/// Complete credential store configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file holding the accounts table
    pub database_path: PathBuf,

    /// How long a call waits on a locked database before giving up
    pub busy_timeout_ms: u64,

    // ═══ ARGON2ID COST ═══
    /// Memory cost in KiB
    pub hash_memory_kib: u32,
    /// Number of passes
    pub hash_iterations: u32,
    /// Degree of parallelism
    pub hash_parallelism: u32,

    // ═══ STORED HASH CEILINGS ═══
    /// Stored hashes whose embedded cost exceeds these are never evaluated
    pub max_hash_memory_kib: u32,
    pub max_hash_iterations: u32,
    pub max_hash_parallelism: u32,

    // ═══ INPUT LIMITS ═══
    /// Enforced on registration only, so lowering them never locks out
    /// existing accounts.
    pub max_username_length: usize,
    pub max_password_length: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            busy_timeout_ms: 5_000,
            hash_memory_kib: argon2::Params::DEFAULT_M_COST,
            hash_iterations: argon2::Params::DEFAULT_T_COST,
            hash_parallelism: argon2::Params::DEFAULT_P_COST,
            max_hash_memory_kib: 256 * 1024,
            max_hash_iterations: 16,
            max_hash_parallelism: 8,
            max_username_length: 64,
            max_password_length: 1024,
        }
    }
}

impl StoreConfig {
    /// Default configuration pointing at the given database file
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Self::default()
        }
    }

    /// Load configuration from `config.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the named file (extension optional, file optional)
    /// with `CREDSTORE_*` environment overrides.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_prefix(config_path, ENV_PREFIX)
    }

    fn load_with_prefix(config_path: &str, env_prefix: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?;

        let config: StoreConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(config::ConfigError::Message(
                "database_path cannot be empty".into(),
            ));
        }

        if self.busy_timeout_ms == 0 {
            return Err(config::ConfigError::Message(
                "busy_timeout_ms must be greater than 0".into(),
            ));
        }

        if self.max_username_length == 0 || self.max_password_length == 0 {
            return Err(config::ConfigError::Message(
                "input length limits must be greater than 0".into(),
            ));
        }

        hashing::build_params(self)
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        if self.hash_memory_kib > self.max_hash_memory_kib
            || self.hash_iterations > self.max_hash_iterations
            || self.hash_parallelism > self.max_hash_parallelism
        {
            return Err(config::ConfigError::Message(
                "hash cost exceeds the stored hash ceilings".into(),
            ));
        }

        Ok(())
    }

    /// Database location as a path
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Busy timeout as Duration
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
