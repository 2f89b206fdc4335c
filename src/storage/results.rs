//! Storage result types
//!
//! Defines result structures returned by storage operations.

/// Public view of a stored account. The password hash never leaves storage
/// through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
}

/// Result of an insert-or-reject against the unique username constraint.
///
/// Infrastructure failures are the `Err` arm of the surrounding `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    Inserted { id: i64 },
    UsernameTaken,
}
