//! Low-level writer for HTML generation.
//!
//! This module provides the `HtmlWriter` struct, the append-only buffer that
//! paragraphs are rendered into one block at a time.
use super::config::HtmlOptions;
use super::postprocess::{collapse_empty_paragraphs, wrap_list_items};
use crate::ooxml::docx::{Paragraph, ParagraphKind};

/// Markup emitted for a paragraph without text.
pub const EMPTY_PARAGRAPH: &str = "<p><br></p>";

/// Append-only HTML buffer.
///
/// Blocks are written in document order and never revisited; list wrapping
/// and blank-line collapsing happen once in [`HtmlWriter::finish`].
#[derive(Debug, Clone)]
pub struct HtmlWriter<'o> {
    buffer: String,
    options: &'o HtmlOptions,
    blocks: usize,
}

impl<'o> HtmlWriter<'o> {
    pub fn new(options: &'o HtmlOptions) -> Self {
        Self {
            buffer: String::with_capacity(4096),
            options,
            blocks: 0,
        }
    }

    /// Classify and render one paragraph.
    pub fn write_paragraph(&mut self, para: &Paragraph<'_>) -> ParagraphKind {
        let runs = para.formatted_runs();
        let kind = para.classify(&runs, self.options);
        let inner: String = runs.iter().map(|run| run.to_html()).collect();
        self.write_block(kind, &inner);
        kind
    }

    /// Append one block. `inner` must already be HTML.
    pub fn write_block(&mut self, kind: ParagraphKind, inner: &str) {
        match kind {
            ParagraphKind::ListItem => {
                self.buffer.push_str("<li>");
                if inner.is_empty() {
                    self.buffer.push_str("&nbsp;");
                } else {
                    self.buffer.push_str(inner);
                }
                self.buffer.push_str("</li>");
            },
            ParagraphKind::Heading(level) => {
                let tag = level.tag();
                self.buffer.push('<');
                self.buffer.push_str(tag);
                self.buffer.push('>');
                self.buffer.push_str(inner);
                self.buffer.push_str("</");
                self.buffer.push_str(tag);
                self.buffer.push('>');
            },
            ParagraphKind::Paragraph => {
                self.buffer.push_str("<p>");
                self.buffer.push_str(inner);
                self.buffer.push_str("</p>");
            },
            ParagraphKind::EmptyParagraph => self.buffer.push_str(EMPTY_PARAGRAPH),
        }
        self.blocks += 1;
    }

    /// Number of blocks written so far.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// The raw blocks written so far, before post-processing.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Apply list wrapping and blank-line collapsing and return the HTML.
    pub fn finish(self) -> String {
        let wrapped = wrap_list_items(&self.buffer);
        collapse_empty_paragraphs(&wrapped, self.options.max_consecutive_empty_paragraphs)
    }
}
