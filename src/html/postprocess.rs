//! Whole-document passes over the assembled HTML.
//!
//! Both passes are idempotent: running them again on their own output
//! changes nothing.
use super::writer::EMPTY_PARAGRAPH;
use memchr::memmem;

const LIST_ITEM_OPEN: &str = "<li>";
const LIST_ITEM_CLOSE: &str = "</li>";
const LIST_OPEN: &str = "<ul>";
const LIST_CLOSE: &str = "</ul>";

/// Wrap every maximal run of adjacent `<li>…</li>` blocks in one `<ul>`.
///
/// List items separated by any other content end up in separate lists. A
/// run that already follows `<ul>` is left alone.
///
/// # Examples
///
/// ```
/// use tamarind::html::postprocess::wrap_list_items;
///
/// assert_eq!(
///     wrap_list_items("<li>a</li><li>b</li><p>x</p><li>c</li>"),
///     "<ul><li>a</li><li>b</li></ul><p>x</p><ul><li>c</li></ul>"
/// );
/// ```
pub fn wrap_list_items(html: &str) -> String {
    let open = memmem::Finder::new(LIST_ITEM_OPEN);
    let close = memmem::Finder::new(LIST_ITEM_CLOSE);

    let mut out = String::with_capacity(html.len() + 32);
    let mut rest = html;
    while let Some(at) = open.find(rest.as_bytes()) {
        out.push_str(&rest[..at]);

        let mut end = at;
        while rest[end..].starts_with(LIST_ITEM_OPEN) {
            end = match close.find(&rest.as_bytes()[end..]) {
                Some(i) => end + i + LIST_ITEM_CLOSE.len(),
                None => rest.len(),
            };
        }

        if out.ends_with(LIST_OPEN) {
            out.push_str(&rest[at..end]);
        } else {
            out.push_str(LIST_OPEN);
            out.push_str(&rest[at..end]);
            out.push_str(LIST_CLOSE);
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

/// Shorten every run of more than `max` adjacent `<p><br></p>` blocks to
/// exactly `max`. A `max` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// use tamarind::html::postprocess::collapse_empty_paragraphs;
///
/// let html = "<p>a</p><p><br></p><p><br></p><p><br></p><p>b</p>";
/// assert_eq!(
///     collapse_empty_paragraphs(html, 2),
///     "<p>a</p><p><br></p><p><br></p><p>b</p>"
/// );
/// ```
pub fn collapse_empty_paragraphs(html: &str, max: usize) -> String {
    let max = max.max(1);
    let finder = memmem::Finder::new(EMPTY_PARAGRAPH);

    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(at) = finder.find(rest.as_bytes()) {
        out.push_str(&rest[..at]);

        let mut end = at;
        let mut count = 0usize;
        while rest[end..].starts_with(EMPTY_PARAGRAPH) {
            end += EMPTY_PARAGRAPH.len();
            count += 1;
        }
        for _ in 0..count.min(max) {
            out.push_str(EMPTY_PARAGRAPH);
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}
