//! Package implementation for Word documents.
use crate::common::{Error, Result};
use crate::ooxml::docx::DOCUMENT_BODY_PART;
use crate::ooxml::docx::document::Document;
use pawpaw_zip::{Archive, ErrorKind as ContainerErrorKind};

/// A Word (.docx) package reduced to the part this crate renders.
///
/// The document body is extracted from the ZIP container once and decoded
/// as UTF-8; invalid sequences are replaced rather than rejected.
///
/// # Examples
///
/// ```rust,no_run
/// use tamarind::ooxml::docx::Package;
///
/// let bytes = std::fs::read("template.docx")?;
/// let pkg = Package::from_bytes(&bytes)?;
/// for para in pkg.document().paragraphs() {
///     println!("{}", para.text());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Package {
    document_xml: String,
}

impl Package {
    /// Read a package from its bytes.
    ///
    /// Container errors are returned unchanged, except that a readable
    /// container without a document body is [`Error::DocumentBodyNotFound`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let archive = Archive::new(bytes)?;
        let body = archive.read(DOCUMENT_BODY_PART).map_err(|err| {
            if matches!(err.kind(), ContainerErrorKind::EntryNotFound(_)) {
                log::warn!("container has no {DOCUMENT_BODY_PART}");
                Error::DocumentBodyNotFound
            } else {
                Error::Container(err)
            }
        })?;
        log::debug!("read {DOCUMENT_BODY_PART}: {} bytes", body.len());

        let document_xml = match String::from_utf8(body) {
            Ok(text) => text,
            Err(err) => {
                log::warn!(
                    "{DOCUMENT_BODY_PART} is not valid UTF-8 at byte {}, decoding lossily",
                    err.utf8_error().valid_up_to()
                );
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            },
        };

        Ok(Self { document_xml })
    }

    /// Build a package around already extracted document XML.
    pub fn from_document_xml(document_xml: impl Into<String>) -> Self {
        Self {
            document_xml: document_xml.into(),
        }
    }

    pub fn document(&self) -> Document<'_> {
        Document::new(&self.document_xml)
    }

    pub fn document_xml(&self) -> &str {
        &self.document_xml
    }

    pub fn into_document_xml(self) -> String {
        self.document_xml
    }
}
