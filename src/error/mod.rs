//! Error handling
//!
//! Defines the error taxonomy of the credential store.

pub mod handlers;
pub mod types;

pub use types::*;
