//! Credential input validator
//!
//! Checks the preconditions on username/password text. Usernames are taken
//! verbatim: no trimming, no case folding.

use super::results::InputRejection;
use crate::config::StoreConfig;

/// Validates a login attempt. Only emptiness is checked: length limits may
/// have changed since the account was registered.
pub fn validate_login(username: &str, password: &str) -> Result<(), InputRejection> {
    if username.is_empty() {
        return Err(InputRejection::EmptyUsername);
    }
    if password.is_empty() {
        return Err(InputRejection::EmptyPassword);
    }
    Ok(())
}

/// Validates a new username/password pair against the configured limits.
pub fn validate_credentials(
    username: &str,
    password: &str,
    config: &StoreConfig,
) -> Result<(), InputRejection> {
    if username.is_empty() {
        return Err(InputRejection::EmptyUsername);
    }
    if password.is_empty() {
        return Err(InputRejection::EmptyPassword);
    }
    if username.len() > config.max_username_length {
        return Err(InputRejection::UsernameTooLong);
    }
    if password.len() > config.max_password_length {
        return Err(InputRejection::PasswordTooLong);
    }
    // SQLite text and PHC encoding both misbehave around embedded NULs
    if username.contains('\0') || password.contains('\0') {
        return Err(InputRejection::NulCharacter);
    }
    Ok(())
}
