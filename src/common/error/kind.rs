//! Error taxonomy used for logging and retry decisions.
use super::types::Error;
use pawpaw_zip::ErrorKind as ContainerErrorKind;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input is not a ZIP container
    InvalidContainerFormat,
    /// A requested container entry is missing
    EntryNotFound,
    /// The container has no document body
    DocumentBodyNotFound,
    /// An entry uses a compression method other than store or deflate
    UnsupportedCompressionMethod,
    /// Decompression failed or produced the wrong size or checksum
    ContainerEntryCorrupt,
    /// The template could not be downloaded
    Fetch,
    /// Anything else
    Other,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Container(err) => match err.kind() {
                ContainerErrorKind::InvalidContainerFormat => ErrorKind::InvalidContainerFormat,
                ContainerErrorKind::EntryNotFound(_) => ErrorKind::EntryNotFound,
                ContainerErrorKind::UnsupportedCompressionMethod(_) => {
                    ErrorKind::UnsupportedCompressionMethod
                },
                ContainerErrorKind::ContainerEntryCorrupt { .. } => {
                    ErrorKind::ContainerEntryCorrupt
                },
            },
            Error::DocumentBodyNotFound => ErrorKind::DocumentBodyNotFound,
            Error::Fetch { .. } | Error::Timeout { .. } => ErrorKind::Fetch,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Whether trying again with the same input can succeed.
    ///
    /// Parse failures are properties of the bytes and never are; only a
    /// download that failed or timed out may.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Fetch
    }
}
