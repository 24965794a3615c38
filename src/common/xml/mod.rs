//! Text escaping shared by the document reader and the HTML writer.
pub mod escape;

pub use escape::{escape_html, unescape_html, unescape_xml};
