//! Office Open XML (OOXML) format implementation.
//!
//! Only the word-processing document body is read: the main document part is
//! located in the package container and walked as flat XML text.
//!
//! # Example: Working with Word Documents
//!
//! ```rust,no_run
//! use tamarind::ooxml::docx::Package;
//!
//! let bytes = std::fs::read("template.docx")?;
//! let pkg = Package::from_bytes(&bytes)?;
//! println!("Document contains {} paragraphs", pkg.document().paragraph_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
