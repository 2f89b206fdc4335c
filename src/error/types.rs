//! Error types
//!
//! Only infrastructure failures are errors. Expected negative outcomes
//! (bad input, duplicate username, unknown user, wrong password, corrupt
//! hash) are values, see [`crate::auth::results`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Storage module errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to prepare storage location {path}: {source}")]
    Location {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("incompatible schema: {0}")]
    SchemaMismatch(String),
}

/// Hashing primitive errors
#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid hashing parameters: {0}")]
    Parameters(String),

    #[error("failed to hash password: {0}")]
    Hashing(String),
}

/// Errors surfaced to callers of the credential store
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    #[error("hashing failed: {0}")]
    Hashing(#[from] HashError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("worker task failed: {0}")]
    Runtime(String),
}

impl From<tokio::task::JoinError> for CredentialError {
    fn from(error: tokio::task::JoinError) -> Self {
        CredentialError::Runtime(error.to_string())
    }
}

impl CredentialError {
    /// True when the backing store could not honor the request.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, CredentialError::StorageUnavailable(_))
    }
}
