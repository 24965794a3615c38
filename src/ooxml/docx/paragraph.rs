//! Paragraph structures and block classification for Word documents.
use crate::html::HtmlOptions;
use crate::ooxml::docx::run::{FormattedRun, Run};
use crate::ooxml::docx::scan::{self, attribute, first_region, start_tag};
use smallvec::SmallVec;

/// Heading levels that map onto HTML headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for a numeric heading depth, if it is one we emit.
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }

    #[inline]
    pub fn depth(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }

    /// The HTML element name, `h1` through `h3`.
    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }
}

/// The HTML block a paragraph becomes.
///
/// List membership wins over a heading style, and a heading style wins over
/// plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphKind {
    Heading(HeadingLevel),
    ListItem,
    Paragraph,
    EmptyParagraph,
}

/// Normalize a style id for comparison: lowercase, spaces removed.
pub(crate) fn normalize_style_id(style: &str) -> String {
    style
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Heading level named by a built-in heading style id such as `Heading1`.
fn builtin_heading_level(normalized: &str) -> Option<HeadingLevel> {
    let depth = normalized.strip_prefix("heading")?;
    match depth {
        "1" => Some(HeadingLevel::H1),
        "2" => Some(HeadingLevel::H2),
        "3" => Some(HeadingLevel::H3),
        _ => None,
    }
}

/// A `<w:p>` element borrowed from the document body.
///
/// # Example
///
/// ```
/// use tamarind::html::HtmlOptions;
/// use tamarind::ooxml::docx::{HeadingLevel, Paragraph, ParagraphKind};
///
/// let para = Paragraph::new(
///     r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Terms</w:t></w:r></w:p>"#,
/// );
/// assert_eq!(para.text(), "Terms");
/// assert_eq!(
///     para.kind(&HtmlOptions::default()),
///     ParagraphKind::Heading(HeadingLevel::H2)
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    xml: &'a str,
}

impl<'a> Paragraph<'a> {
    /// Wrap the XML of one `<w:p>` element.
    pub fn new(xml: &'a str) -> Self {
        Self { xml }
    }

    /// The raw XML of this paragraph.
    #[inline]
    pub fn xml(&self) -> &'a str {
        self.xml
    }

    /// Runs of this paragraph in document order.
    ///
    /// Runs wrapped in hyperlinks or other inline containers are included.
    pub fn runs(&self) -> SmallVec<[Run<'a>; 8]> {
        scan::regions(self.xml, "w:r")
            .map(|region| Run::new(region.as_str()))
            .collect()
    }

    pub fn formatted_runs(&self) -> SmallVec<[FormattedRun; 8]> {
        self.runs().iter().map(Run::format).collect()
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs().iter().map(Run::text).collect()
    }

    /// Body of the `<w:pPr>` element, if any.
    pub fn properties(&self) -> Option<&'a str> {
        first_region(self.xml, "w:pPr").map(|region| region.inner())
    }

    /// The paragraph style id from `<w:pStyle w:val="..."/>`.
    pub fn style_id(&self) -> Option<String> {
        let tag = start_tag(self.properties()?, "w:pStyle")?;
        attribute(tag, b"val")
    }

    /// Whether the paragraph carries a numbering reference anywhere.
    pub fn is_list_item(&self) -> bool {
        start_tag(self.xml, "w:numPr").is_some()
    }

    /// Heading level of the paragraph style, from the built-in style ids or
    /// the configured aliases.
    pub fn heading_level(&self, options: &HtmlOptions) -> Option<HeadingLevel> {
        let style = normalize_style_id(&self.style_id()?);
        builtin_heading_level(&style).or_else(|| options.heading_alias(&style))
    }

    /// Classify using already formatted runs of this paragraph.
    pub fn classify(&self, runs: &[FormattedRun], options: &HtmlOptions) -> ParagraphKind {
        if self.is_list_item() {
            ParagraphKind::ListItem
        } else if let Some(level) = self.heading_level(options) {
            ParagraphKind::Heading(level)
        } else if runs.iter().any(|run| !run.text.is_empty()) {
            ParagraphKind::Paragraph
        } else {
            ParagraphKind::EmptyParagraph
        }
    }

    pub fn kind(&self, options: &HtmlOptions) -> ParagraphKind {
        self.classify(&self.formatted_runs(), options)
    }
}
