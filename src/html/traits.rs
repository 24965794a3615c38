//! Core trait for HTML conversion.
//!
//! This module defines the `ToHtml` trait that enables document views to be
//! converted to HTML fragments.
use super::config::HtmlOptions;
use super::writer::HtmlWriter;
use crate::common::Result;
use crate::ooxml::docx::{Document, Package, Paragraph};

/// Core trait for types that can be converted to HTML.
///
/// # Examples
///
/// ```rust,no_run
/// use tamarind::html::ToHtml;
/// use tamarind::ooxml::docx::Package;
///
/// # fn main() -> Result<(), tamarind::Error> {
/// let bytes = std::fs::read("template.docx").map_err(|e| tamarind::Error::Other(e.to_string()))?;
/// let pkg = Package::from_bytes(&bytes)?;
///
/// // Convert the whole document
/// let html = pkg.to_html()?;
///
/// // Or single paragraphs, without list wrapping
/// for para in pkg.document().paragraphs() {
///     println!("{}", para.to_html()?);
/// }
/// # Ok(())
/// # }
/// ```
pub trait ToHtml {
    /// Convert this item to HTML with default options.
    fn to_html(&self) -> Result<String> {
        self.to_html_with_options(&HtmlOptions::default())
    }

    /// Convert this item to HTML with custom options.
    fn to_html_with_options(&self, options: &HtmlOptions) -> Result<String>;
}

impl ToHtml for Paragraph<'_> {
    fn to_html_with_options(&self, options: &HtmlOptions) -> Result<String> {
        let mut writer = HtmlWriter::new(options);
        writer.write_paragraph(self);
        Ok(writer.as_str().to_string())
    }
}

impl ToHtml for Document<'_> {
    fn to_html_with_options(&self, options: &HtmlOptions) -> Result<String> {
        Ok(super::render_document(self, options))
    }
}

impl ToHtml for Package {
    fn to_html_with_options(&self, options: &HtmlOptions) -> Result<String> {
        self.document().to_html_with_options(options)
    }
}
