//! Credential store
//!
//! The only authority for creating and verifying accounts. Each operation
//! runs on the blocking pool with its own connection; the store itself
//! holds configuration and a hasher, never a connection or cached accounts.

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zeroize::Zeroizing;

use crate::auth::hashing::{CredentialHasher, HashCheck};
use crate::auth::results::{RegisterOutcome, VerifyOutcome};
use crate::auth::validator::{validate_credentials, validate_login};
use crate::config::StoreConfig;
use crate::error::CredentialError;
use crate::storage::results::{Account, InsertResult};
use crate::storage::{database, operations};

/// Handle to an initialized credential store. Cheap to clone; clones share
/// configuration only.
#[derive(Clone)]
pub struct CredentialStore {
    config: Arc<StoreConfig>,
    hasher: CredentialHasher,
}

/// Initialize a store at `location` with default settings.
pub async fn initialize(location: impl Into<PathBuf>) -> Result<CredentialStore, CredentialError> {
    CredentialStore::initialize(StoreConfig::new(location)).await
}

impl CredentialStore {
    /// Ensure the accounts table exists at the configured location and
    /// return a handle to it.
    pub async fn initialize(config: StoreConfig) -> Result<Self, CredentialError> {
        config.validate()?;
        let hasher = CredentialHasher::from_config(&config)?;
        let config = Arc::new(config);

        let setup = Arc::clone(&config);
        tokio::task::spawn_blocking(move || database::initialize(&setup)).await??;

        info!(
            "Credential store initialized at {}",
            config.database_path().display()
        );
        Ok(Self { config, hasher })
    }

    /// Location of the backing database
    pub fn location(&self) -> &Path {
        self.config.database_path()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Register a new account. `Ok(false)` covers invalid input and taken
    /// usernames alike.
    pub async fn register(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        Ok(self.register_outcome(username, password).await?.is_success())
    }

    /// Register a new account, reporting why it was not created.
    pub async fn register_outcome(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RegisterOutcome, CredentialError> {
        if let Err(reason) = validate_credentials(username, password, &self.config) {
            debug!("Registration rejected before storage: {:?}", reason);
            return Ok(RegisterOutcome::InvalidInput(reason));
        }

        let config = Arc::clone(&self.config);
        let hasher = self.hasher.clone();
        let username = username.to_owned();
        let password = Zeroizing::new(password.to_owned());

        let outcome = tokio::task::spawn_blocking(move || {
            let password_hash = hasher.hash(password.as_bytes())?;
            drop(password);

            let conn = database::open(&config)?;
            let outcome = match operations::insert_account(&conn, &username, &password_hash)? {
                InsertResult::Inserted { id } => {
                    info!("Registered account '{}' (id {})", username, id);
                    RegisterOutcome::Created { id }
                }
                InsertResult::UsernameTaken => RegisterOutcome::DuplicateUsername,
            };
            Ok::<_, CredentialError>(outcome)
        })
        .await??;

        Ok(outcome)
    }

    /// Check a login attempt. Unknown users and wrong passwords are both
    /// `Ok(false)`.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        Ok(self.verify_outcome(username, password).await?.is_success())
    }

    /// Check a login attempt, reporting why it failed.
    pub async fn verify_outcome(
        &self,
        username: &str,
        password: &str,
    ) -> Result<VerifyOutcome, CredentialError> {
        if let Err(reason) = validate_login(username, password) {
            return Ok(VerifyOutcome::InvalidInput(reason));
        }

        let config = Arc::clone(&self.config);
        let hasher = self.hasher.clone();
        let username = username.to_owned();
        let password = Zeroizing::new(password.to_owned());

        let outcome = tokio::task::spawn_blocking(move || {
            let stored = {
                let conn = database::open(&config)?;
                operations::find_password_hash(&conn, &username)?
            };

            let outcome = match stored {
                None => {
                    hasher.burn(password.as_bytes());
                    VerifyOutcome::UnknownUser
                }
                Some(stored) => match hasher.verify(password.as_bytes(), &stored) {
                    HashCheck::Match => VerifyOutcome::Valid,
                    HashCheck::Mismatch => VerifyOutcome::WrongPassword,
                    HashCheck::Malformed => VerifyOutcome::MalformedHash,
                },
            };
            debug!("Verification for '{}': {:?}", username, outcome);
            Ok::<_, CredentialError>(outcome)
        })
        .await??;

        Ok(outcome)
    }

    /// Look up an account without exposing its hash
    pub async fn account(&self, username: &str) -> Result<Option<Account>, CredentialError> {
        let config = Arc::clone(&self.config);
        let username = username.to_owned();
        let account = tokio::task::spawn_blocking(move || {
            let conn = database::open(&config)?;
            operations::find_account(&conn, &username)
        })
        .await??;
        Ok(account)
    }

    /// Number of stored accounts
    pub async fn account_count(&self) -> Result<u64, CredentialError> {
        let config = Arc::clone(&self.config);
        let count = tokio::task::spawn_blocking(move || {
            let conn = database::open(&config)?;
            operations::count_accounts(&conn)
        })
        .await??;
        Ok(count)
    }
}
