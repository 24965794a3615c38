//! Entry lookup and extraction.
use crate::headers::{DEFAULT_MAX_ENTRY_SIZE, LocalHeaders, PackageEntry, parse_data_descriptor};
use crate::{CompressionMethod, Error, ErrorKind};
use flate2::read::DeflateDecoder;
use std::io::Read;

/// Upper bound on the buffer reserved up front from a declared size.
/// Larger entries still inflate, the buffer just grows as it goes.
const MAX_PREALLOCATION: usize = 64 * 1024 * 1024;

/// A ZIP container held in memory.
///
/// Lookups walk the local file headers from the start of the buffer on every
/// call; nothing is indexed or cached.
///
/// # Example
///
/// ```rust,no_run
/// use pawpaw_zip::Archive;
///
/// let data = std::fs::read("contract.docx")?;
/// let archive = Archive::new(&data)?;
/// let body = archive.read("word/document.xml")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Archive<'data> {
    data: &'data [u8],
    max_entry_size: u64,
}

impl<'data> Archive<'data> {
    /// Wrap a byte buffer after checking that it starts like a ZIP file.
    pub fn new(data: &'data [u8]) -> Result<Self, Error> {
        if data.len() < 4 || !data.starts_with(b"PK") {
            return Err(ErrorKind::InvalidContainerFormat.into());
        }
        Ok(Self {
            data,
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
        })
    }

    /// Cap the uncompressed size of any entry read from this archive.
    #[inline]
    pub fn with_max_entry_size(mut self, max_entry_size: u64) -> Self {
        self.max_entry_size = max_entry_size;
        self
    }

    #[inline]
    pub fn max_entry_size(&self) -> u64 {
        self.max_entry_size
    }

    /// Iterate over all entries in buffer order.
    #[inline]
    pub fn entries(&self) -> LocalHeaders<'data> {
        LocalHeaders::with_max_entry_size(self.data, self.max_entry_size)
    }

    /// Find the first entry with the given name. A leading `/` is ignored.
    pub fn entry(&self, name: &str) -> Result<PackageEntry, Error> {
        let normalized = name.strip_prefix('/').unwrap_or(name);
        self.entries()
            .find(|entry| entry.name == normalized)
            .ok_or_else(|| ErrorKind::EntryNotFound(normalized.to_string()).into())
    }

    /// Check if an entry with the given name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_ok()
    }

    /// Find and extract an entry.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, Error> {
        let entry = self.entry(name)?;
        self.read_entry(&entry)
    }

    /// Extract the uncompressed bytes of an entry found in this archive.
    pub fn read_entry(&self, entry: &PackageEntry) -> Result<Vec<u8>, Error> {
        match entry.compression_method {
            CompressionMethod::Store => self.read_stored(entry),
            CompressionMethod::Deflate => self.read_deflated(entry),
            CompressionMethod::Unsupported(id) => {
                Err(ErrorKind::UnsupportedCompressionMethod(id).into())
            },
        }
    }

    fn read_stored(&self, entry: &PackageEntry) -> Result<Vec<u8>, Error> {
        if entry.sizes_deferred() {
            return Err(Error::corrupt(
                &entry.name,
                "stored entry does not declare its size",
            ));
        }
        if entry.compressed_size != entry.uncompressed_size {
            return Err(Error::corrupt(
                &entry.name,
                format!(
                    "stored entry declares {} compressed and {} uncompressed bytes",
                    entry.compressed_size, entry.uncompressed_size
                ),
            ));
        }
        self.check_limit(entry)?;

        let payload = self.payload(entry)?;
        verify_crc(entry, payload, self.expected_crc(entry, payload.len()))?;
        Ok(payload.to_vec())
    }

    fn read_deflated(&self, entry: &PackageEntry) -> Result<Vec<u8>, Error> {
        let deferred = entry.sizes_deferred();
        let (input, limit) = if deferred {
            let rest = self
                .data
                .get(entry.offset..)
                .ok_or_else(|| Error::corrupt(&entry.name, "payload starts past the end"))?;
            (rest, self.max_entry_size)
        } else {
            self.check_limit(entry)?;
            (self.payload(entry)?, entry.uncompressed_size)
        };
        let capacity = usize::try_from(limit).unwrap_or(usize::MAX).min(MAX_PREALLOCATION);

        // One byte past the limit is enough to tell an oversized stream apart.
        let mut decoder = DeflateDecoder::new(input);
        let mut decompressed = Vec::with_capacity(capacity);
        decoder
            .by_ref()
            .take(limit.saturating_add(1))
            .read_to_end(&mut decompressed)
            .map_err(|e| Error::corrupt(&entry.name, format!("inflate failed: {e}")))?;
        if decompressed.len() as u64 > limit {
            let reason = if deferred {
                format!("inflates past the {limit}-byte entry limit")
            } else {
                format!("inflates past its declared {limit} bytes")
            };
            return Err(Error::corrupt(&entry.name, reason));
        }
        let consumed = decoder.total_in() as usize;

        if deferred {
            let descriptor = parse_data_descriptor(self.data, entry.offset + consumed)
                .ok_or_else(|| Error::corrupt(&entry.name, "missing data descriptor"))?;
            check_size(entry, decompressed.len(), descriptor.uncompressed_size)?;
            verify_crc(entry, &decompressed, descriptor.crc32)?;
        } else {
            check_size(entry, decompressed.len(), entry.uncompressed_size)?;
            verify_crc(entry, &decompressed, self.expected_crc(entry, input.len()))?;
        }

        Ok(decompressed)
    }

    fn check_limit(&self, entry: &PackageEntry) -> Result<(), Error> {
        if entry.uncompressed_size > self.max_entry_size {
            return Err(Error::corrupt(
                &entry.name,
                format!(
                    "declares {} bytes, over the {}-byte entry limit",
                    entry.uncompressed_size, self.max_entry_size
                ),
            ));
        }
        Ok(())
    }

    /// The declared compressed payload of an entry with known sizes.
    fn payload(&self, entry: &PackageEntry) -> Result<&'data [u8], Error> {
        usize::try_from(entry.compressed_size)
            .ok()
            .and_then(|size| entry.offset.checked_add(size))
            .and_then(|end| self.data.get(entry.offset..end))
            .ok_or_else(|| Error::corrupt(&entry.name, "payload runs past the end of the container"))
    }

    /// The CRC to check against: the data descriptor's when the entry has
    /// one, the header's otherwise.
    fn expected_crc(&self, entry: &PackageEntry, payload_len: usize) -> u32 {
        if entry.has_data_descriptor() {
            if let Some(descriptor) = parse_data_descriptor(self.data, entry.offset + payload_len) {
                return descriptor.crc32;
            }
        }
        entry.crc32
    }
}

fn check_size(entry: &PackageEntry, actual: usize, declared: u64) -> Result<(), Error> {
    if actual as u64 != declared {
        return Err(Error::corrupt(
            &entry.name,
            format!("inflated {actual} bytes, expected {declared}"),
        ));
    }
    Ok(())
}

fn verify_crc(entry: &PackageEntry, data: &[u8], expected: u32) -> Result<(), Error> {
    let actual = crc32fast::hash(data);
    if actual != expected {
        return Err(Error::corrupt(
            &entry.name,
            format!("CRC-32 mismatch: expected {expected:08x}, got {actual:08x}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RawEntry, ZipBuilder, deflate, deflate_stored_block, fake_local_header};
    use rstest::rstest;

    const BODY: &[u8] = b"<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>";

    fn corrupt_reason(err: Error) -> String {
        match err.into_kind() {
            ErrorKind::ContainerEntryCorrupt { reason, .. } => reason,
            other => panic!("expected a corrupt entry error, got {other:?}"),
        }
    }

    #[test]
    fn test_stored_and_deflated_round_trip() {
        let stored = "Plain stored text, exactly as written.";
        let deflated = "Deflated text ".repeat(40);
        let bytes = ZipBuilder::new()
            .stored("stored.txt", stored.as_bytes())
            .deflated("deflated.txt", deflated.as_bytes())
            .finish();

        let archive = Archive::new(&bytes).unwrap();
        assert_eq!(archive.read("stored.txt").unwrap(), stored.as_bytes());
        assert_eq!(archive.read("deflated.txt").unwrap(), deflated.as_bytes());
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::too_short(b"PK\x03".as_slice())]
    #[case::pdf(b"%PDF-1.7\n".as_slice())]
    #[case::zeros(b"\x00\x00\x00\x00".as_slice())]
    fn test_rejects_non_zip(#[case] data: &[u8]) {
        let err = Archive::new(data).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidContainerFormat));
    }

    #[rstest]
    #[case("word/document.xml")]
    #[case("/word/document.xml")]
    fn test_lookup_ignores_leading_slash(#[case] name: &str) {
        let bytes = ZipBuilder::new().deflated("word/document.xml", BODY).finish();
        let archive = Archive::new(&bytes).unwrap();
        assert!(archive.contains(name));
        assert_eq!(archive.read(name).unwrap(), BODY);
    }

    #[test]
    fn test_entry_not_found() {
        let bytes = ZipBuilder::new().stored("mimetype", b"text/plain").finish();
        let archive = Archive::new(&bytes).unwrap();

        let err = archive.read("word/document.xml").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::EntryNotFound(name) if name == "word/document.xml"));
    }

    #[test]
    fn test_first_entry_wins_on_duplicate_names() {
        let bytes = ZipBuilder::new()
            .stored("dup.txt", b"first")
            .stored("dup.txt", b"second")
            .finish();
        let archive = Archive::new(&bytes).unwrap();
        assert_eq!(archive.read("dup.txt").unwrap(), b"first");
    }

    #[rstest]
    #[case::bzip2(12)]
    #[case::lzma(14)]
    #[case::zstd(93)]
    fn test_unsupported_method(#[case] method: u16) {
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "word/document.xml",
                method,
                flags: 0,
                crc32: crc32fast::hash(BODY),
                compressed_size: BODY.len() as u32,
                uncompressed_size: BODY.len() as u32,
                payload: BODY,
            })
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        let err = archive.read("word/document.xml").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedCompressionMethod(m) if *m == method));
    }

    #[test]
    fn test_unsupported_method_elsewhere_is_ignored() {
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "media/blob.bin",
                method: 12,
                flags: 0,
                crc32: 0,
                compressed_size: 3,
                uncompressed_size: 3,
                payload: b"abc",
            })
            .deflated("word/document.xml", BODY)
            .finish();
        let archive = Archive::new(&bytes).unwrap();
        assert_eq!(archive.read("word/document.xml").unwrap(), BODY);
    }

    #[test]
    fn test_declared_size_mismatch_is_corrupt() {
        let compressed = deflate(BODY);
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "word/document.xml",
                method: 8,
                flags: 0,
                crc32: crc32fast::hash(BODY),
                compressed_size: compressed.len() as u32,
                uncompressed_size: BODY.len() as u32 + 10,
                payload: &compressed,
            })
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        let reason = corrupt_reason(archive.read("word/document.xml").unwrap_err());
        assert!(reason.contains("expected"), "{reason}");
    }

    #[test]
    fn test_garbage_deflate_stream_is_corrupt() {
        let garbage = [0xFFu8; 16];
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "word/document.xml",
                method: 8,
                flags: 0,
                crc32: 0,
                compressed_size: garbage.len() as u32,
                uncompressed_size: 100,
                payload: &garbage,
            })
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        let err = archive.read("word/document.xml").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ContainerEntryCorrupt { .. }));
    }

    #[test]
    fn test_crc_mismatch_is_corrupt() {
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "notes.txt",
                method: 0,
                flags: 0,
                crc32: crc32fast::hash(b"something else"),
                compressed_size: 5,
                uncompressed_size: 5,
                payload: b"hello",
            })
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        let reason = corrupt_reason(archive.read("notes.txt").unwrap_err());
        assert!(reason.starts_with("CRC-32 mismatch"), "{reason}");
    }

    #[test]
    fn test_stored_size_disagreement_is_corrupt() {
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "notes.txt",
                method: 0,
                flags: 0,
                crc32: crc32fast::hash(b"hello"),
                compressed_size: 5,
                uncompressed_size: 6,
                payload: b"hello",
            })
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        let err = archive.read("notes.txt").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ContainerEntryCorrupt { .. }));
    }

    #[test]
    fn test_truncated_payload_is_corrupt() {
        let mut bytes = ZipBuilder::new().stored("notes.txt", b"hello world").finish_entries();
        bytes.truncate(bytes.len() - 4);
        let archive = Archive::new(&bytes).unwrap();

        let reason = corrupt_reason(archive.read("notes.txt").unwrap_err());
        assert!(reason.contains("past the end"), "{reason}");
    }

    #[test]
    fn test_deflated_with_data_descriptor() {
        let bytes = ZipBuilder::new()
            .deflated_with_descriptor("word/document.xml", BODY)
            .stored("docProps/app.xml", b"<Properties/>")
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        assert_eq!(archive.read("word/document.xml").unwrap(), BODY);
        assert_eq!(archive.read("docProps/app.xml").unwrap(), b"<Properties/>");
    }

    #[test]
    fn test_deferred_deflate_without_descriptor_is_corrupt() {
        let compressed = deflate(BODY);
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "word/document.xml",
                method: 8,
                flags: 1 << 3,
                crc32: 0,
                compressed_size: 0,
                uncompressed_size: 0,
                payload: &compressed,
            })
            .finish_entries();
        let archive = Archive::new(&bytes).unwrap();

        let reason = corrupt_reason(archive.read("word/document.xml").unwrap_err());
        assert_eq!(reason, "missing data descriptor");
    }

    #[test]
    fn test_deferred_stored_entry_is_corrupt() {
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "notes.txt",
                method: 0,
                flags: 1 << 3,
                crc32: 0,
                compressed_size: 0,
                uncompressed_size: 0,
                payload: b"hello",
            })
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        let err = archive.read("notes.txt").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ContainerEntryCorrupt { .. }));
    }

    #[test]
    fn test_empty_entries() {
        let bytes = ZipBuilder::new()
            .stored("empty-stored", b"")
            .deflated("empty-deflated", b"")
            .finish();
        let archive = Archive::new(&bytes).unwrap();
        assert!(archive.read("empty-stored").unwrap().is_empty());
        assert!(archive.read("empty-deflated").unwrap().is_empty());
    }

    #[test]
    fn test_inflating_past_declared_size_is_corrupt() {
        let payload = vec![0u8; 1024 * 1024];
        let compressed = deflate(&payload);
        let bytes = ZipBuilder::new()
            .raw(RawEntry {
                name: "word/document.xml",
                method: 8,
                flags: 0,
                crc32: crc32fast::hash(&payload),
                compressed_size: compressed.len() as u32,
                uncompressed_size: 10,
                payload: &compressed,
            })
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        let reason = corrupt_reason(archive.read("word/document.xml").unwrap_err());
        assert_eq!(reason, "inflates past its declared 10 bytes");
    }

    #[test]
    fn test_deferred_entry_over_limit_is_corrupt() {
        let bytes = ZipBuilder::new()
            .deflated_with_descriptor("word/document.xml", BODY)
            .finish();
        let archive = Archive::new(&bytes).unwrap().with_max_entry_size(16);
        assert_eq!(archive.max_entry_size(), 16);

        let reason = corrupt_reason(archive.read("word/document.xml").unwrap_err());
        assert_eq!(reason, "inflates past the 16-byte entry limit");
    }

    #[test]
    fn test_declared_size_over_limit_is_corrupt() {
        let bytes = ZipBuilder::new()
            .stored("notes.txt", b"hello world")
            .deflated("word/document.xml", BODY)
            .finish();
        let archive = Archive::new(&bytes).unwrap().with_max_entry_size(8);

        let reason = corrupt_reason(archive.read("notes.txt").unwrap_err());
        assert!(reason.contains("over the 8-byte entry limit"), "{reason}");
        let reason = corrupt_reason(archive.read("word/document.xml").unwrap_err());
        assert!(reason.contains("over the 8-byte entry limit"), "{reason}");
    }

    #[test]
    fn test_body_after_deferred_entry_hiding_a_header() {
        let mut blob = b"binary".to_vec();
        blob.extend_from_slice(&fake_local_header("decoy.xml"));
        let bytes = ZipBuilder::new()
            .with_descriptor("media/blob.bin", &blob, deflate_stored_block(&blob))
            .deflated("word/document.xml", BODY)
            .finish();
        let archive = Archive::new(&bytes).unwrap();

        assert!(!archive.contains("decoy.xml"));
        assert_eq!(archive.read("media/blob.bin").unwrap(), blob);
        assert_eq!(archive.read("word/document.xml").unwrap(), BODY);
    }
}
