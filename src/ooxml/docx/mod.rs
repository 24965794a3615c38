//! Word (.docx) document body support.
//!
//! This module reads the main document part of a Word package and exposes
//! it as borrowed views over the XML text, without building a tree.
//!
//! # Architecture
//!
//! - `Package`: the document body extracted from the .docx container
//! - `Document`: the body, walked paragraph by paragraph
//! - `Paragraph`: a `<w:p>` with its runs and block classification
//! - `Run`: a `<w:r>` with its text and character formatting
//! - `scan`: balanced tag region scanning shared by all of the above
//!
//! # Example
//!
//! ```rust,no_run
//! use tamarind::html::HtmlOptions;
//! use tamarind::ooxml::docx::Package;
//!
//! let bytes = std::fs::read("template.docx")?;
//! let pkg = Package::from_bytes(&bytes)?;
//! let options = HtmlOptions::default();
//!
//! for para in pkg.document().paragraphs() {
//!     println!("{:?}: {}", para.kind(&options), para.text());
//!     for run in para.runs() {
//!         println!("  Run: {} ({:?})", run.text(), run.formatting());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod document;
pub mod package;
pub mod paragraph;
pub mod run;
pub mod scan;

pub use document::{Document, Paragraphs};
pub use package::Package;
pub use paragraph::{HeadingLevel, Paragraph, ParagraphKind};
pub use run::{FormattedRun, Run, RunFormatting};

/// Path of the main document part inside a word-processing package.
pub const DOCUMENT_BODY_PART: &str = "word/document.xml";
