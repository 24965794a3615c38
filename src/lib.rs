//! Tamarind - DOCX to HTML conversion for contract templates
//!
//! This library turns the body of a Word (.docx) document into a small,
//! predictable HTML fragment suitable for a rich-text template editor.
//!
//! # Features
//!
//! - **Container reading**: the document body is pulled out of the ZIP
//!   package by walking local file headers (see the `pawpaw-zip` crate)
//! - **Tree-free scanning**: paragraphs and runs are located as balanced tag
//!   regions, so truncated or slightly malformed bodies still convert
//! - **Small output vocabulary**: `<h1>`–`<h3>`, `<p>`, `<ul>`/`<li>`,
//!   `<strong>`, `<em>`, `<u>` and `<br>`
//! - **Deterministic**: identical input bytes always give identical HTML
//! - **Template download** (feature `fetch`): fetch a template by URL and
//!   answer `{template_url}` requests with `{html}` or `{error}`
//!
//! # Example - Converting a DOCX file
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("contract.docx")?;
//! let html = tamarind::docx_to_html(&bytes)?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Custom heading styles
//!
//! ```no_run
//! use tamarind::html::{HeadingLevel, HtmlOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = HtmlOptions::new()
//!     .with_heading_alias("Überschrift 1", HeadingLevel::H1)
//!     .with_max_consecutive_empty_paragraphs(1);
//!
//! let bytes = std::fs::read("vertrag.docx")?;
//! let html = tamarind::docx_to_html_with_options(&bytes, &options)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Walking paragraphs
//!
//! ```no_run
//! use tamarind::html::HtmlOptions;
//! use tamarind::ooxml::docx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("contract.docx")?;
//! let pkg = Package::from_bytes(&bytes)?;
//! let options = HtmlOptions::default();
//!
//! for para in pkg.document().paragraphs() {
//!     println!("{:?}: {}", para.kind(&options), para.text());
//! }
//! # Ok(())
//! # }
//! ```

/// Common types and utilities shared across the crate
pub mod common;

/// HTML conversion
pub mod html;

/// OOXML (Office Open XML) document body parser
pub mod ooxml;

/// Conversion request/response types and template download
pub mod service;

pub use common::{Error, ErrorKind, Result};
pub use html::{HtmlOptions, ToHtml};
pub use ooxml::docx::DOCUMENT_BODY_PART;

use ooxml::docx::Package;

/// Convert the bytes of a .docx file to HTML with default options.
///
/// # Errors
///
/// Container errors from reading the package, or
/// [`Error::DocumentBodyNotFound`] when the package has no document body.
#[inline]
pub fn docx_to_html(bytes: &[u8]) -> Result<String> {
    docx_to_html_with_options(bytes, &HtmlOptions::default())
}

/// Convert the bytes of a .docx file to HTML.
///
/// The result is never empty: a document without paragraphs converts to a
/// single `<p><br></p>`.
pub fn docx_to_html_with_options(bytes: &[u8], options: &HtmlOptions) -> Result<String> {
    let package = Package::from_bytes(bytes)?;
    let html = html::render_document(&package.document(), options);
    log::debug!("converted {} input bytes to {} bytes of HTML", bytes.len(), html.len());
    Ok(html)
}
