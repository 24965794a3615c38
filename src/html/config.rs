//! Configuration for HTML conversion.
//!
//! This module defines the options used to customize how document
//! paragraphs are mapped onto HTML blocks.
pub use crate::ooxml::docx::HeadingLevel;
use crate::ooxml::docx::paragraph::normalize_style_id;

/// Style ids Word writes for the Portuguese and Spanish "Título N" styles,
/// with and without the dropped diacritic.
const LOCALIZED_HEADING_ALIASES: [(&str, HeadingLevel); 6] = [
    ("Ttulo1", HeadingLevel::H1),
    ("Ttulo2", HeadingLevel::H2),
    ("Ttulo3", HeadingLevel::H3),
    ("Titulo1", HeadingLevel::H1),
    ("Titulo2", HeadingLevel::H2),
    ("Titulo3", HeadingLevel::H3),
];

/// Configuration options for HTML conversion.
///
/// `Heading1` to `Heading3` (in any letter case, with or without spaces)
/// are always recognized. Aliases add further style ids that should render
/// as headings.
///
/// # Examples
///
/// ```rust
/// use tamarind::html::{HeadingLevel, HtmlOptions};
///
/// // Create with defaults
/// let options = HtmlOptions::default();
///
/// // Or customize
/// let options = HtmlOptions::new()
///     .without_heading_aliases()
///     .with_heading_alias("Überschrift1", HeadingLevel::H1)
///     .with_max_consecutive_empty_paragraphs(1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Extra paragraph style ids treated as headings, stored normalized
    pub heading_aliases: Vec<(String, HeadingLevel)>,
    /// Longest run of `<p><br></p>` kept in the output
    pub max_consecutive_empty_paragraphs: usize,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            heading_aliases: LOCALIZED_HEADING_ALIASES
                .iter()
                .map(|(style, level)| (normalize_style_id(style), *level))
                .collect(),
            max_consecutive_empty_paragraphs: 2,
        }
    }
}

impl HtmlOptions {
    /// Create a new `HtmlOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render paragraphs with style id `style` as headings of `level`.
    ///
    /// Matching ignores letter case and spaces. A later alias for the same
    /// style id replaces an earlier one.
    pub fn with_heading_alias(mut self, style: &str, level: HeadingLevel) -> Self {
        let style = normalize_style_id(style);
        self.heading_aliases.retain(|(existing, _)| *existing != style);
        self.heading_aliases.push((style, level));
        self
    }

    /// Drop all aliases, including the built-in localized ones.
    #[inline]
    pub fn without_heading_aliases(mut self) -> Self {
        self.heading_aliases.clear();
        self
    }

    /// Set the longest run of empty paragraphs kept. Values below 1 are
    /// raised to 1.
    #[inline]
    pub fn with_max_consecutive_empty_paragraphs(mut self, max: usize) -> Self {
        self.max_consecutive_empty_paragraphs = max.max(1);
        self
    }

    /// Heading level for an already normalized style id.
    pub fn heading_alias(&self, normalized_style: &str) -> Option<HeadingLevel> {
        self.heading_aliases
            .iter()
            .find(|(style, _)| style == normalized_style)
            .map(|(_, level)| *level)
    }
}
