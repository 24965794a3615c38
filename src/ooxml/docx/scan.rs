//! Balanced tag region scanning over flat XML text.
//!
//! WordprocessingML bodies are walked without building a tree: a region is
//! the text from an element's start tag to its matching end tag, found by
//! substring search and a nesting counter. Scanning is a pure function of
//! `(text, tag, cursor)` returning the region and the cursor to resume from,
//! so a caller can scan runs inside one paragraph independently of the outer
//! paragraph walk.
//!
//! Malformed input degrades instead of failing: a start tag without a
//! matching end tag yields a region that runs to the end of the text.
use memchr::{memchr, memmem};
use quick_xml::events::BytesStart;

/// One element found in an XML text, start tag through end tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<'a> {
    source: &'a str,
    start: usize,
    content_start: usize,
    content_end: usize,
    end: usize,
    truncated: bool,
}

impl<'a> Region<'a> {
    /// The whole element, start tag to end tag inclusive.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        &self.source[self.start..self.end]
    }

    /// Text between the start tag and the end tag.
    #[inline]
    pub fn inner(&self) -> &'a str {
        &self.source[self.content_start..self.content_end]
    }

    /// The start tag, including its attributes.
    #[inline]
    pub fn start_tag(&self) -> &'a str {
        &self.source[self.start..self.content_start]
    }

    /// Byte offset of the start tag in the scanned text.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the region in the scanned text.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether the element was written as `<tag/>`.
    #[inline]
    pub fn is_self_closing(&self) -> bool {
        self.start_tag().ends_with("/>")
    }

    /// Whether the text ended before the matching end tag.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// A start tag located in the text.
#[derive(Debug, Clone, Copy)]
struct StartTag {
    start: usize,
    end: usize,
    self_closing: bool,
}

/// Bytes that may follow an element name inside a tag.
#[inline(always)]
fn is_name_boundary(b: u8) -> bool {
    matches!(b, b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n')
}

/// Search patterns for one qualified element name.
#[derive(Debug, Clone)]
struct TagPattern {
    name: String,
    open: memmem::Finder<'static>,
    close: memmem::Finder<'static>,
}

impl TagPattern {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            open: memmem::Finder::new(format!("<{name}").as_bytes()).into_owned(),
            close: memmem::Finder::new(format!("</{name}").as_bytes()).into_owned(),
        }
    }

    /// Next start tag at or after `from`. `<w:r` must not match `<w:rPr>`.
    fn find_start(&self, bytes: &[u8], from: usize) -> Option<StartTag> {
        let prefix_len = self.open.needle().len();
        let mut pos = from;
        loop {
            let at = pos + self.open.find(bytes.get(pos..)?)?;
            let after = at + prefix_len;
            match bytes.get(after) {
                Some(&b) if is_name_boundary(b) => {
                    return Some(match memchr(b'>', &bytes[after..]) {
                        Some(i) => {
                            let end = after + i + 1;
                            StartTag {
                                start: at,
                                end,
                                self_closing: bytes[end - 2] == b'/',
                            }
                        },
                        None => StartTag {
                            start: at,
                            end: bytes.len(),
                            self_closing: false,
                        },
                    });
                },
                Some(_) => pos = at + 1,
                None => {
                    return Some(StartTag {
                        start: at,
                        end: bytes.len(),
                        self_closing: false,
                    });
                },
            }
        }
    }

    /// Next end tag at or after `from`, as `(start, end)` offsets.
    fn find_end(&self, bytes: &[u8], from: usize) -> Option<(usize, usize)> {
        let prefix_len = self.close.needle().len();
        let mut pos = from;
        loop {
            let at = pos + self.close.find(bytes.get(pos..)?)?;
            let after = at + prefix_len;
            match bytes.get(after) {
                Some(&b) if b == b'>' || b.is_ascii_whitespace() => {
                    let end = memchr(b'>', &bytes[after..]).map_or(bytes.len(), |i| after + i + 1);
                    return Some((at, end));
                },
                Some(_) => pos = at + 1,
                None => return Some((at, bytes.len())),
            }
        }
    }

    fn next_region<'a>(&self, xml: &'a str, cursor: usize) -> Option<(Region<'a>, usize)> {
        let bytes = xml.as_bytes();
        let open = self.find_start(bytes, cursor)?;

        if open.self_closing {
            let region = Region {
                source: xml,
                start: open.start,
                content_start: open.end,
                content_end: open.end,
                end: open.end,
                truncated: false,
            };
            return Some((region, open.end));
        }

        let mut depth = 1usize;
        let mut pos = open.end;
        loop {
            let Some((close_start, close_end)) = self.find_end(bytes, pos) else {
                log::debug!(
                    "unterminated <{}> at byte {}, region runs to end of text",
                    self.name,
                    open.start
                );
                let region = Region {
                    source: xml,
                    start: open.start,
                    content_start: open.end,
                    content_end: bytes.len(),
                    end: bytes.len(),
                    truncated: true,
                };
                return Some((region, bytes.len()));
            };

            match self.find_start(bytes, pos) {
                Some(nested) if nested.start < close_start => {
                    if !nested.self_closing {
                        depth += 1;
                    }
                    pos = nested.end;
                },
                _ => {
                    depth -= 1;
                    pos = close_end;
                    if depth == 0 {
                        let region = Region {
                            source: xml,
                            start: open.start,
                            content_start: open.end,
                            content_end: close_start,
                            end: close_end,
                            truncated: false,
                        };
                        return Some((region, close_end));
                    }
                },
            }
        }
    }
}

/// Find the next `tag` element at or after byte `cursor`.
///
/// Returns the region and the cursor just past it, or `None` when no further
/// start tag exists.
///
/// # Examples
///
/// ```
/// use tamarind::ooxml::docx::scan::next_region;
///
/// let xml = "<w:p><w:r/></w:p><w:p>two</w:p>";
/// let (first, cursor) = next_region(xml, "w:p", 0).unwrap();
/// assert_eq!(first.as_str(), "<w:p><w:r/></w:p>");
/// let (second, _) = next_region(xml, "w:p", cursor).unwrap();
/// assert_eq!(second.inner(), "two");
/// ```
pub fn next_region<'a>(xml: &'a str, tag: &str, cursor: usize) -> Option<(Region<'a>, usize)> {
    TagPattern::new(tag).next_region(xml, cursor)
}

/// The first `tag` element in `xml`, if any.
#[inline]
pub fn first_region<'a>(xml: &'a str, tag: &str) -> Option<Region<'a>> {
    next_region(xml, tag, 0).map(|(region, _)| region)
}

/// Iterate over consecutive `tag` elements of `xml`.
///
/// Elements nested inside a yielded region are part of that region and are
/// not yielded separately.
pub fn regions<'a>(xml: &'a str, tag: &str) -> Regions<'a> {
    Regions {
        xml,
        pattern: TagPattern::new(tag),
        cursor: 0,
    }
}

/// Iterator returned by [`regions`].
#[derive(Debug, Clone)]
pub struct Regions<'a> {
    xml: &'a str,
    pattern: TagPattern,
    cursor: usize,
}

impl<'a> Iterator for Regions<'a> {
    type Item = Region<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (region, cursor) = self.pattern.next_region(self.xml, self.cursor)?;
        self.cursor = cursor;
        Some(region)
    }
}

/// The first start tag of a `tag` element in `xml`, attributes included.
///
/// Unlike [`first_region`] this never looks for the end tag, which suits
/// property elements such as `<w:b/>` or `<w:pStyle w:val="Heading1"/>`.
pub fn start_tag<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = TagPattern::new(tag).find_start(xml.as_bytes(), 0)?;
    Some(&xml[open.start..open.end])
}

/// Value of the attribute with local name `local_name` on a start tag.
///
/// The namespace prefix of the attribute is ignored, so `w:val` and `val`
/// both match `b"val"`.
pub fn attribute(start_tag: &str, local_name: &[u8]) -> Option<String> {
    let content = start_tag.strip_prefix('<')?;
    let content = content.strip_suffix('>').unwrap_or(content);
    let content = content.strip_suffix('/').unwrap_or(content).trim_end();
    let name_len = content
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(content.len());

    let element = BytesStart::from_content(content, name_len);
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local_name)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}
