//! Sequential ZIP reader for Office Open XML packages.
//!
//! This crate extracts single entries from an in-memory ZIP container by
//! walking its local file headers front to back. The central directory is
//! never read, so a package whose tail is damaged can still yield the entries
//! that precede the damage.
//!
//! Only the two methods Office writers use are supported: store and deflate.
//! Extracted bytes are checked against the declared size and CRC-32, and no
//! entry inflates past [`DEFAULT_MAX_ENTRY_SIZE`] unless the caller raises it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pawpaw_zip::Archive;
//!
//! let data = std::fs::read("contract.docx")?;
//! let archive = Archive::new(&data)?;
//!
//! for entry in archive.entries() {
//!     println!("{} ({} bytes)", entry.name, entry.uncompressed_size);
//! }
//!
//! let body = archive.read("word/document.xml")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]

mod archive;
mod errors;
mod headers;

#[cfg(test)]
mod test_support;

pub use archive::Archive;
pub use errors::{Error, ErrorKind};
pub use headers::{
    CompressionMethod, DEFAULT_MAX_ENTRY_SIZE, LOCAL_FILE_HEADER_SIGNATURE, LocalHeaders, PackageEntry,
};
