//! Error handlers
//!
//! Logging and classification helpers for the presentation layer.

use crate::error::types::CredentialError;
use log::error;

/// Log a credential store error
pub fn handle_error(err: &CredentialError) {
    error!("Credential store error: {}", err);
}

/// Generic user-facing message for an error.
///
/// Intentionally vague so account existence is never revealed.
pub fn user_message(err: &CredentialError) -> &'static str {
    match err {
        CredentialError::StorageUnavailable(_) => "Service temporarily unavailable",
        CredentialError::Hashing(_) | CredentialError::Runtime(_) => "Internal error",
        CredentialError::Config(_) => "Service misconfigured",
    }
}
