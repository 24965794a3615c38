//! Unified error types for Tamarind.
//!
//! Container failures from the ZIP layer, document-level failures, and
//! template download failures all surface through one [`Error`] type.

// Submodule declarations
pub mod kind;
pub mod types;

// Re-exports
pub use kind::ErrorKind;
pub use types::{Error, Result};
