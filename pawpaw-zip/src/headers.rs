//! Local file header parsing.
//!
//! The reader never consults the central directory: entries are discovered by
//! walking local file headers in buffer order, and the cursor advances past
//! each header and its payload.
use flate2::read::DeflateDecoder;
use memchr::memmem;
use std::io::{self, Read};

/// Signature that opens every local file header (`PK\x03\x04`).
pub const LOCAL_FILE_HEADER_SIGNATURE: &[u8; 4] = b"PK\x03\x04";

/// Optional signature in front of a data descriptor (`PK\x07\x08`).
pub(crate) const DATA_DESCRIPTOR_SIGNATURE: &[u8; 4] = b"PK\x07\x08";

/// Fixed part of a local file header, before the name and extra field.
const LOCAL_FILE_HEADER_LEN: usize = 30;

/// General purpose flag: CRC and sizes follow the payload in a data descriptor.
const FLAG_DATA_DESCRIPTOR: u16 = 1 << 3;

/// Largest uncompressed entry the reader inflates unless told otherwise.
pub const DEFAULT_MAX_ENTRY_SIZE: u64 = 256 * 1024 * 1024;

/// Compression method of a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Method 0, payload stored verbatim.
    Store,
    /// Method 8, raw deflate stream.
    Deflate,
    /// Any other method id. Only an error once the entry is extracted.
    Unsupported(u16),
}

impl CompressionMethod {
    /// Map a header method id to a compression method.
    #[inline]
    pub fn from_id(id: u16) -> Self {
        match id {
            0 => Self::Store,
            8 => Self::Deflate,
            other => Self::Unsupported(other),
        }
    }

    /// The header method id.
    #[inline]
    pub fn as_id(self) -> u16 {
        match self {
            Self::Store => 0,
            Self::Deflate => 8,
            Self::Unsupported(id) => id,
        }
    }
}

/// One file inside the container, as described by its local file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Entry name, decoded lossily as UTF-8.
    pub name: String,
    /// Offset of the local file header signature.
    pub header_offset: usize,
    /// Offset of the first payload byte.
    pub offset: usize,
    /// Declared compressed size (zero when deferred to a data descriptor).
    pub compressed_size: u64,
    /// Declared uncompressed size (zero when deferred to a data descriptor).
    pub uncompressed_size: u64,
    pub compression_method: CompressionMethod,
    /// Declared CRC-32 of the uncompressed bytes.
    pub crc32: u32,
    /// General purpose bit flags.
    pub flags: u16,
}

impl PackageEntry {
    /// Whether a data descriptor follows the payload.
    #[inline]
    pub fn has_data_descriptor(&self) -> bool {
        self.flags & FLAG_DATA_DESCRIPTOR != 0
    }

    /// Whether the header leaves the sizes to the data descriptor, so the
    /// payload length is unknown until it has been inflated.
    #[inline]
    pub fn sizes_deferred(&self) -> bool {
        self.has_data_descriptor() && self.compressed_size == 0 && self.uncompressed_size == 0
    }

    /// Where the next signature search starts after this entry.
    ///
    /// A deflated entry with deferred sizes is inflated to find where its
    /// stream and data descriptor end. If that fails, the search resumes
    /// right after the header.
    fn next_cursor(&self, data: &[u8], max_entry_size: u64) -> usize {
        let len = data.len();
        if self.sizes_deferred() {
            return match self.compression_method {
                CompressionMethod::Deflate => deflate_stream_len(data, self.offset, max_entry_size)
                    .map(|consumed| {
                        let descriptor = self.offset + consumed;
                        descriptor + data_descriptor_len(data, descriptor)
                    })
                    .map_or(self.offset, |end| end.min(len)),
                _ => self.offset.min(len),
            };
        }
        usize::try_from(self.compressed_size)
            .ok()
            .and_then(|size| self.offset.checked_add(size))
            .map_or(len, |end| end.min(len))
    }
}

/// CRC and sizes stored after a payload when the header defers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DataDescriptor {
    pub crc32: u32,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

#[inline]
fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parse the local file header whose signature starts at `at`.
///
/// Returns `None` when the fixed header or the file name runs past the end of
/// the buffer.
pub(crate) fn parse_local_header(data: &[u8], at: usize) -> Option<PackageEntry> {
    let header = data.get(at..at.checked_add(LOCAL_FILE_HEADER_LEN)?)?;

    let flags = read_u16(header, 6);
    let method = read_u16(header, 8);
    let crc32 = read_u32(header, 14);
    let compressed_size = read_u32(header, 18);
    let uncompressed_size = read_u32(header, 22);
    let name_len = read_u16(header, 26) as usize;
    let extra_len = read_u16(header, 28) as usize;

    let name_start = at + LOCAL_FILE_HEADER_LEN;
    let name_bytes = data.get(name_start..name_start + name_len)?;

    Some(PackageEntry {
        name: String::from_utf8_lossy(name_bytes).into_owned(),
        header_offset: at,
        offset: name_start + name_len + extra_len,
        compressed_size: u64::from(compressed_size),
        uncompressed_size: u64::from(uncompressed_size),
        compression_method: CompressionMethod::from_id(method),
        crc32,
        flags,
    })
}

/// Compressed length of the deflate stream starting at `at`, or `None` when
/// the stream is invalid or inflates past `max_entry_size`.
pub(crate) fn deflate_stream_len(data: &[u8], at: usize, max_entry_size: u64) -> Option<usize> {
    let mut decoder = DeflateDecoder::new(data.get(at..)?);
    let inflated = io::copy(
        &mut decoder.by_ref().take(max_entry_size.saturating_add(1)),
        &mut io::sink(),
    )
    .ok()?;
    if inflated > max_entry_size {
        return None;
    }
    usize::try_from(decoder.total_in()).ok()
}

/// Length of the data descriptor at `at`: 16 bytes with its signature, 12
/// without.
fn data_descriptor_len(data: &[u8], at: usize) -> usize {
    if data.get(at..at.saturating_add(4)) == Some(DATA_DESCRIPTOR_SIGNATURE.as_slice()) {
        16
    } else {
        12
    }
}

/// Parse a data descriptor at `at`, with or without its signature.
pub(crate) fn parse_data_descriptor(data: &[u8], at: usize) -> Option<DataDescriptor> {
    let mut at = at;
    if data.get(at..at.checked_add(4)?) == Some(DATA_DESCRIPTOR_SIGNATURE.as_slice()) {
        at += 4;
    }
    let fields = data.get(at..at.checked_add(12)?)?;
    Some(DataDescriptor {
        crc32: read_u32(fields, 0),
        compressed_size: u64::from(read_u32(fields, 4)),
        uncompressed_size: u64::from(read_u32(fields, 8)),
    })
}

/// Lazy walk over every local file header of a buffer, in buffer order.
///
/// The walk ends at the first signature whose header cannot be read in full,
/// or when no further signature exists.
pub struct LocalHeaders<'data> {
    data: &'data [u8],
    cursor: usize,
    finder: memmem::Finder<'static>,
    max_entry_size: u64,
}

impl<'data> LocalHeaders<'data> {
    #[cfg(test)]
    pub(crate) fn new(data: &'data [u8]) -> Self {
        Self::with_max_entry_size(data, DEFAULT_MAX_ENTRY_SIZE)
    }

    pub(crate) fn with_max_entry_size(data: &'data [u8], max_entry_size: u64) -> Self {
        Self {
            data,
            cursor: 0,
            finder: memmem::Finder::new(LOCAL_FILE_HEADER_SIGNATURE),
            max_entry_size,
        }
    }
}

impl Iterator for LocalHeaders<'_> {
    type Item = PackageEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.data.get(self.cursor..)?;
        let at = self.cursor + self.finder.find(rest)?;

        match parse_local_header(self.data, at) {
            Some(entry) => {
                self.cursor = entry.next_cursor(self.data, self.max_entry_size);
                Some(entry)
            },
            None => {
                self.cursor = self.data.len();
                None
            },
        }
    }
}
