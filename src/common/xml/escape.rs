use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automaton is built only once, thread-safe
static HTML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build HTML escaper")
});

static HTML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;"])
        .expect("Failed to build HTML unescaper")
});

/// Escape text for an HTML text node.
///
/// Replaces `&`, `<` and `>` in a single left-to-right pass. Every input
/// byte is visited once, so an `&` introduced by an earlier replacement is
/// never escaped again: the result equals escaping `&` first, then `<`,
/// then `>`.
///
/// # Examples
///
/// ```
/// use tamarind::common::xml::escape_html;
/// assert_eq!(escape_html("Smith & Sons <Ltd>"), "Smith &amp; Sons &lt;Ltd&gt;");
/// assert_eq!(escape_html("&lt;"), "&amp;lt;");
/// ```
#[inline]
pub fn escape_html(s: &str) -> String {
    HTML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"])
}

/// Reverse [`escape_html`].
///
/// # Examples
///
/// ```
/// use tamarind::common::xml::unescape_html;
/// assert_eq!(unescape_html("a &amp;lt; b"), "a &lt; b");
/// ```
#[inline]
pub fn unescape_html(s: &str) -> String {
    HTML_UNESCAPER.replace_all(s, &["&", "<", ">"])
}

/// Decode entity and character references in text-node content.
///
/// The five predefined entities and numeric references (`&#233;`,
/// `&#x2014;`) are decoded. Text holding an unknown or malformed reference
/// is returned unchanged.
///
/// # Examples
///
/// ```
/// use tamarind::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&quot;hello&apos;"), "\"hello'");
/// assert_eq!(unescape_xml("caf&#233; &#x2014; x"), "café — x");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&invalid; &amp;"), "&invalid; &amp;");
/// ```
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    match quick_xml::escape::unescape(s) {
        Ok(text) => text,
        Err(err) => {
            log::debug!("keeping undecodable text as written: {err}");
            Cow::Borrowed(s)
        },
    }
}
