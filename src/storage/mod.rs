//! Durable account storage
//!
//! SQLite-backed accounts table. Every call opens its own connection and
//! drops it before returning; nothing is cached between calls.

pub mod database;
pub mod operations;
pub mod results;

pub use results::{Account, InsertResult};
