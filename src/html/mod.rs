//! HTML conversion of Word document bodies.
//!
//! Paragraphs become `<h1>`–`<h3>`, `<p>` or `<li>` blocks, runs become
//! escaped text wrapped in `<strong>`, `<em>` and `<u>`. Adjacent list items
//! are grouped into `<ul>` and long runs of blank paragraphs are shortened.
//!
//! # Quick Start
//!
//! ```rust
//! use tamarind::html::{HtmlOptions, ToHtml};
//! use tamarind::ooxml::docx::Document;
//!
//! let doc = Document::new(
//!     r#"<w:body><w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p></w:body>"#,
//! );
//! assert_eq!(doc.to_html().unwrap(), "<h1>Title</h1>");
//!
//! let options = HtmlOptions::new().with_max_consecutive_empty_paragraphs(1);
//! assert_eq!(Document::new("<w:p/><w:p/>").to_html_with_options(&options).unwrap(), "<p><br></p>");
//! ```
//!
//! # Architecture
//!
//! - [`ToHtml`] trait: conversion entry point for documents and paragraphs
//! - [`HtmlOptions`]: configuration for conversion behavior
//! - [`writer`]: the append-only output buffer
//! - [`postprocess`]: list wrapping and blank-line collapsing
pub mod config;
pub mod postprocess;
pub mod traits;
pub mod writer;

pub use config::{HeadingLevel, HtmlOptions};
pub use traits::ToHtml;
pub use writer::{EMPTY_PARAGRAPH, HtmlWriter};

use crate::ooxml::docx::Document;

/// Render a whole document. Never returns an empty string.
pub(crate) fn render_document(document: &Document<'_>, options: &HtmlOptions) -> String {
    let mut writer = HtmlWriter::new(options);
    let mut list_items = 0usize;
    for para in document.paragraphs() {
        if writer.write_paragraph(&para) == crate::ooxml::docx::ParagraphKind::ListItem {
            list_items += 1;
        }
    }
    log::debug!(
        "rendered {} paragraphs ({} list items)",
        writer.block_count(),
        list_items
    );

    let html = writer.finish();
    if html.is_empty() {
        EMPTY_PARAGRAPH.to_string()
    } else {
        html
    }
}
