//! Runs: the smallest unit of uniformly formatted text in a paragraph.
use crate::common::xml::{escape_html, unescape_xml};
use crate::ooxml::docx::scan::{self, attribute, first_region, start_tag};

/// Character formatting that survives into the HTML output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RunFormatting {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl RunFormatting {
    /// Read the toggles from a `<w:rPr>` body.
    ///
    /// A present element turns its toggle on unless its `val` attribute
    /// switches it off.
    pub fn from_properties(properties: &str) -> Self {
        Self {
            bold: toggle(properties, "w:b", false),
            italic: toggle(properties, "w:i", false),
            underline: toggle(properties, "w:u", true),
        }
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline)
    }
}

fn toggle(properties: &str, tag: &str, none_is_off: bool) -> bool {
    let Some(element) = start_tag(properties, tag) else {
        return false;
    };
    match attribute(element, b"val") {
        None => true,
        Some(value) => {
            let value = value.trim();
            !(value == "0"
                || value.eq_ignore_ascii_case("false")
                || value.eq_ignore_ascii_case("off")
                || (none_is_off && value.eq_ignore_ascii_case("none")))
        },
    }
}

/// Display text of one run together with its formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedRun {
    /// Decoded text, not yet HTML escaped
    pub text: String,
    pub formatting: RunFormatting,
}

impl FormattedRun {
    pub fn new(text: impl Into<String>, formatting: RunFormatting) -> Self {
        Self {
            text: text.into(),
            formatting,
        }
    }

    /// Render as an HTML fragment.
    ///
    /// Text is escaped once, then wrapped with underline innermost and bold
    /// outermost. A run without text renders as nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use tamarind::ooxml::docx::{FormattedRun, RunFormatting};
    ///
    /// let run = FormattedRun::new(
    ///     "Hi",
    ///     RunFormatting { bold: true, italic: true, underline: true },
    /// );
    /// assert_eq!(run.to_html(), "<strong><em><u>Hi</u></em></strong>");
    /// ```
    pub fn to_html(&self) -> String {
        if self.text.is_empty() {
            return String::new();
        }
        let mut html = escape_html(&self.text);
        if self.formatting.underline {
            html = format!("<u>{html}</u>");
        }
        if self.formatting.italic {
            html = format!("<em>{html}</em>");
        }
        if self.formatting.bold {
            html = format!("<strong>{html}</strong>");
        }
        html
    }
}

/// A `<w:r>` element borrowed from the document body.
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    xml: &'a str,
}

impl<'a> Run<'a> {
    /// Wrap the XML of one `<w:r>` element.
    pub fn new(xml: &'a str) -> Self {
        Self { xml }
    }

    /// The raw XML of this run.
    #[inline]
    pub fn xml(&self) -> &'a str {
        self.xml
    }

    /// Body of the run's `<w:rPr>` element, if it has one.
    pub fn properties(&self) -> Option<&'a str> {
        first_region(self.xml, "w:rPr").map(|region| region.inner())
    }

    pub fn formatting(&self) -> RunFormatting {
        self.properties()
            .map(RunFormatting::from_properties)
            .unwrap_or_default()
    }

    /// Concatenated content of every `<w:t>` in document order.
    ///
    /// Whitespace is kept as written. Entity and character references are
    /// decoded per `<w:t>`; one holding a malformed reference stays as written.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in scan::regions(self.xml, "w:t") {
            text.push_str(&unescape_xml(node.inner()));
        }
        text
    }

    pub fn format(&self) -> FormattedRun {
        FormattedRun::new(self.text(), self.formatting())
    }
}
