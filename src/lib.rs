//! Credential store
//!
//! Registers usernames with Argon2id-hashed passwords in SQLite and verifies
//! login attempts against them.

pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod utils;

pub use crate::config::StoreConfig;
pub use error::CredentialError;
pub use storage::Account;
pub use store::{CredentialStore, initialize};
