//! The main document body of a Word package.
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::scan::{self, Regions, first_region};

/// The text of `word/document.xml`, walked paragraph by paragraph.
///
/// # Examples
///
/// ```
/// use tamarind::ooxml::docx::Document;
///
/// let doc = Document::new(
///     "<w:document><w:body><w:p><w:r><w:t>One</w:t></w:r></w:p><w:p/></w:body></w:document>",
/// );
/// let texts: Vec<String> = doc.paragraphs().map(|p| p.text()).collect();
/// assert_eq!(texts, ["One", ""]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    xml: &'a str,
}

impl<'a> Document<'a> {
    pub fn new(xml: &'a str) -> Self {
        Self { xml }
    }

    #[inline]
    pub fn xml(&self) -> &'a str {
        self.xml
    }

    /// Content of `<w:body>`, or the whole text when there is no body
    /// element to narrow to.
    pub fn body(&self) -> &'a str {
        first_region(self.xml, "w:body").map_or(self.xml, |region| region.inner())
    }

    /// Paragraphs in document order, including those inside table cells.
    pub fn paragraphs(&self) -> Paragraphs<'a> {
        Paragraphs {
            inner: scan::regions(self.body(), "w:p"),
        }
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }
}

/// Iterator returned by [`Document::paragraphs`].
#[derive(Debug, Clone)]
pub struct Paragraphs<'a> {
    inner: Regions<'a>,
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = Paragraph<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|region| Paragraph::new(region.as_str()))
    }
}
