//! Credential handling
//!
//! Input preconditions, password hashing, and the outcome types that the
//! store collapses into plain booleans.

pub mod hashing;
pub mod results;
pub mod validator;

pub use hashing::{CredentialHasher, HashCheck};
pub use results::{InputRejection, RegisterOutcome, VerifyOutcome};
pub use validator::{validate_credentials, validate_login};
