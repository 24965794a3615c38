//! Main error type for Tamarind operations.
use thiserror::Error;

/// Main error type for Tamarind operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The ZIP container could not be read
    #[error("Container error: {0}")]
    Container(#[from] pawpaw_zip::Error),

    /// Valid container, but not a word-processing package
    #[error("Document body not found: the package has no {}", crate::ooxml::docx::DOCUMENT_BODY_PART)]
    DocumentBodyNotFound,

    /// Template download failed before any parsing happened
    #[error("failed to fetch template from {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Template download exceeded its deadline
    #[error("failed to fetch template from {url}: timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for Tamarind operations.
pub type Result<T> = std::result::Result<T, Error>;
