//! Hand-rolled ZIP fixtures for unit tests.
use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

pub(crate) fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Wrap `data` in a single final stored deflate block, so the raw bytes
/// appear verbatim inside the compressed stream.
pub(crate) fn deflate_stored_block(data: &[u8]) -> Vec<u8> {
    let len = data.len() as u16;
    let mut block = vec![0x01];
    block.extend_from_slice(&len.to_le_bytes());
    block.extend_from_slice(&(!len).to_le_bytes());
    block.extend_from_slice(data);
    block
}

/// A local file header whose declared size points far past any buffer.
pub(crate) fn fake_local_header(name: &str) -> Vec<u8> {
    let mut header = b"PK\x03\x04".to_vec();
    header.extend_from_slice(&20u16.to_le_bytes());
    header.extend_from_slice(&0u16.to_le_bytes());
    header.extend_from_slice(&0u16.to_le_bytes());
    header.extend_from_slice(&[0; 8]);
    header.extend_from_slice(&0xFFFF_FF00u32.to_le_bytes());
    header.extend_from_slice(&0xFFFF_FF00u32.to_le_bytes());
    header.extend_from_slice(&(name.len() as u16).to_le_bytes());
    header.extend_from_slice(&0u16.to_le_bytes());
    header.extend_from_slice(name.as_bytes());
    header
}

/// Raw field values for one local file header.
pub(crate) struct RawEntry<'a> {
    pub name: &'a str,
    pub method: u16,
    pub flags: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub payload: &'a [u8],
}

/// Builds a ZIP byte buffer entry by entry, with a central directory and
/// end record so the fixtures look like real packages.
pub(crate) struct ZipBuilder {
    entries: Vec<u8>,
    central: Vec<u8>,
    count: u16,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            central: Vec::new(),
            count: 0,
        }
    }

    pub fn stored(self, name: &str, data: &[u8]) -> Self {
        let size = data.len() as u32;
        self.raw(RawEntry {
            name,
            method: 0,
            flags: 0,
            crc32: crc32fast::hash(data),
            compressed_size: size,
            uncompressed_size: size,
            payload: data,
        })
    }

    pub fn deflated(self, name: &str, data: &[u8]) -> Self {
        let compressed = deflate(data);
        self.raw(RawEntry {
            name,
            method: 8,
            flags: 0,
            crc32: crc32fast::hash(data),
            compressed_size: compressed.len() as u32,
            uncompressed_size: data.len() as u32,
            payload: &compressed,
        })
    }

    /// A deflated entry whose header defers CRC and sizes to a signed data
    /// descriptor after the payload.
    pub fn deflated_with_descriptor(self, name: &str, data: &[u8]) -> Self {
        let compressed = deflate(data);
        self.with_descriptor(name, data, compressed)
    }

    /// Like [`Self::deflated_with_descriptor`], with a caller-built stream.
    pub fn with_descriptor(self, name: &str, data: &[u8], compressed: Vec<u8>) -> Self {
        let compressed_size = compressed.len() as u32;
        let mut payload = compressed;
        payload.extend_from_slice(b"PK\x07\x08");
        payload.extend_from_slice(&crc32fast::hash(data).to_le_bytes());
        payload.extend_from_slice(&compressed_size.to_le_bytes());
        payload.extend_from_slice(&(data.len() as u32).to_le_bytes());
        self.raw(RawEntry {
            name,
            method: 8,
            flags: 1 << 3,
            crc32: 0,
            compressed_size: 0,
            uncompressed_size: 0,
            payload: &payload,
        })
    }

    pub fn raw(mut self, entry: RawEntry<'_>) -> Self {
        let offset = self.entries.len() as u32;
        let name = entry.name.as_bytes();

        self.entries.extend_from_slice(b"PK\x03\x04");
        self.entries.extend_from_slice(&20u16.to_le_bytes());
        self.entries.extend_from_slice(&entry.flags.to_le_bytes());
        self.entries.extend_from_slice(&entry.method.to_le_bytes());
        self.entries.extend_from_slice(&[0; 4]);
        self.entries.extend_from_slice(&entry.crc32.to_le_bytes());
        self.entries
            .extend_from_slice(&entry.compressed_size.to_le_bytes());
        self.entries
            .extend_from_slice(&entry.uncompressed_size.to_le_bytes());
        self.entries
            .extend_from_slice(&(name.len() as u16).to_le_bytes());
        self.entries.extend_from_slice(&0u16.to_le_bytes());
        self.entries.extend_from_slice(name);
        self.entries.extend_from_slice(entry.payload);

        self.central.extend_from_slice(b"PK\x01\x02");
        self.central.extend_from_slice(&20u16.to_le_bytes());
        self.central.extend_from_slice(&20u16.to_le_bytes());
        self.central.extend_from_slice(&entry.flags.to_le_bytes());
        self.central.extend_from_slice(&entry.method.to_le_bytes());
        self.central.extend_from_slice(&[0; 4]);
        self.central.extend_from_slice(&entry.crc32.to_le_bytes());
        self.central
            .extend_from_slice(&entry.compressed_size.to_le_bytes());
        self.central
            .extend_from_slice(&entry.uncompressed_size.to_le_bytes());
        self.central
            .extend_from_slice(&(name.len() as u16).to_le_bytes());
        self.central.extend_from_slice(&[0; 12]);
        self.central.extend_from_slice(&offset.to_le_bytes());
        self.central.extend_from_slice(name);

        self.count += 1;
        self
    }

    /// Only the local headers and payloads, without a central directory.
    pub fn finish_entries(self) -> Vec<u8> {
        self.entries
    }

    pub fn finish(self) -> Vec<u8> {
        let mut bytes = self.entries;
        let central_offset = bytes.len() as u32;
        bytes.extend_from_slice(&self.central);

        bytes.extend_from_slice(b"PK\x05\x06");
        bytes.extend_from_slice(&[0; 4]);
        bytes.extend_from_slice(&self.count.to_le_bytes());
        bytes.extend_from_slice(&self.count.to_le_bytes());
        bytes.extend_from_slice(&(self.central.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&central_offset.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes
    }
}
