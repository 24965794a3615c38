use std::fmt;

/// An error raised while reading a ZIP container.
///
/// The concrete failure is carried by [`ErrorKind`]; use [`Error::kind`] to
/// branch on it.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The kinds of failures the container reader reports.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The buffer is too short or does not start with a ZIP signature.
    #[error("not a ZIP container")]
    InvalidContainerFormat,

    /// No local file header carries the requested name.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// The entry uses a compression method other than store or deflate.
    #[error("unsupported compression method: {0}")]
    UnsupportedCompressionMethod(u16),

    /// Decompression failed, the payload was truncated, or the size/CRC
    /// checks did not match the declared values.
    #[error("corrupt entry {name}: {reason}")]
    ContainerEntryCorrupt { name: String, reason: String },
}

impl Error {
    /// The kind of failure.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Consume the error and return its kind.
    #[inline]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn corrupt(name: &str, reason: impl Into<String>) -> Self {
        Self::from(ErrorKind::ContainerEntryCorrupt {
            name: name.to_string(),
            reason: reason.into(),
        })
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for Error {}
