//! Authentication result types
//!
//! Every expected negative outcome is a value here. Callers of the store only
//! ever see `bool`; the reason is kept for logging and tests.

/// Why a username/password pair was rejected before touching storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRejection {
    EmptyUsername,
    EmptyPassword,
    UsernameTooLong,
    PasswordTooLong,
    NulCharacter,
}

/// Result of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created { id: i64 },
    InvalidInput(InputRejection),
    DuplicateUsername,
}

impl RegisterOutcome {
    /// True only if a brand-new account now exists
    pub fn is_success(&self) -> bool {
        matches!(self, RegisterOutcome::Created { .. })
    }
}

/// Result of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Valid,
    InvalidInput(InputRejection),
    UnknownUser,
    WrongPassword,
    MalformedHash,
}

impl VerifyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOutcome::Valid)
    }
}
