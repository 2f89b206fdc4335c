//! Utility functions
//!
//! Logging setup shared by the binary and embedding applications.

pub mod logging;

pub use logging::setup_logging;
