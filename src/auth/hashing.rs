//! Password hashing
//!
//! Argon2id with a fresh OS-random salt per hash. Hashes are stored as PHC
//! strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so verification always
//! uses the salt and cost embedded in the stored value.

use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Algorithm, Argon2, Params, Version};
use log::warn;

use crate::config::StoreConfig;
use crate::error::HashError;

/// Outcome of checking a password against a stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashCheck {
    Match,
    Mismatch,
    /// Stored value is not a hash this primitive can verify
    Malformed,
}

/// Build Argon2 cost parameters from configuration
pub fn build_params(config: &StoreConfig) -> Result<Params, HashError> {
    Params::new(
        config.hash_memory_kib,
        config.hash_iterations,
        config.hash_parallelism,
        None,
    )
    .map_err(|e| HashError::Parameters(e.to_string()))
}

/// Argon2id hasher configured with the store's cost parameters
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    ceiling: CostCeiling,
}

#[derive(Debug, Clone, Copy)]
struct CostCeiling {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl CostCeiling {
    fn admits(&self, params: &Params) -> bool {
        params.m_cost() <= self.memory_kib
            && params.t_cost() <= self.iterations
            && params.p_cost() <= self.parallelism
    }
}

impl CredentialHasher {
    pub fn from_config(config: &StoreConfig) -> Result<Self, HashError> {
        let params = build_params(config)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            ceiling: CostCeiling {
                memory_kib: config.max_hash_memory_kib,
                iterations: config.max_hash_iterations,
                parallelism: config.max_hash_parallelism,
            },
        })
    }

    /// Hash a password with a fresh random salt, returning the PHC string bytes.
    pub fn hash(&self, password: &[u8]) -> Result<Vec<u8>, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password, &salt)
            .map_err(|e| HashError::Hashing(e.to_string()))?;
        Ok(hash.to_string().into_bytes())
    }

    /// Check a password against stored PHC bytes.
    ///
    /// Never fails: anything the primitive cannot parse or verify is `Malformed`,
    /// as is any hash whose embedded cost is above the configured ceiling.
    pub fn verify(&self, password: &[u8], stored: &[u8]) -> HashCheck {
        let Ok(encoded) = std::str::from_utf8(stored) else {
            warn!("Stored password hash is not valid UTF-8");
            return HashCheck::Malformed;
        };

        let parsed = match PasswordHash::new(encoded) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Stored password hash could not be parsed: {}", e);
                return HashCheck::Malformed;
            }
        };

        match Params::try_from(&parsed) {
            Ok(params) if self.ceiling.admits(&params) => {}
            Ok(params) => {
                warn!(
                    "Stored password hash cost exceeds ceiling (m={}, t={}, p={})",
                    params.m_cost(),
                    params.t_cost(),
                    params.p_cost()
                );
                return HashCheck::Malformed;
            }
            Err(e) => {
                warn!("Stored password hash has unusable parameters: {}", e);
                return HashCheck::Malformed;
            }
        }

        match self.argon2.verify_password(password, &parsed) {
            Ok(()) => HashCheck::Match,
            Err(password_hash::Error::Password) => HashCheck::Mismatch,
            Err(e) => {
                warn!("Stored password hash could not be verified: {}", e);
                HashCheck::Malformed
            }
        }
    }

    /// Spend roughly one hash worth of work and discard the result.
    ///
    /// Used when the username is unknown so that path costs about the same
    /// as a real verification.
    pub fn burn(&self, password: &[u8]) {
        let _ = self.hash(password);
    }
}
