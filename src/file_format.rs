//! On-disk format boundary.
//!
//! Declares the header layout and checksum methods a stored tree file
//! agrees on, so external tooling can produce and validate files. This
//! crate does not read or write the node/pattern/bucket sections
//! themselves; [`FileHeader::to_bytes`] / [`FileHeader::from_bytes`]
//! are the seam a reader or writer would build on.

use std::error::Error;
use std::fmt;

use sha2::{Digest, Sha256};

/// Magic bytes at offset zero of a stored tree file.
pub const FILE_MAGIC: [u8; 4] = [0x07, 0x12, 0xEE, 0x2E];

pub const MIN_SUPPORTED_VERSION: u8 = 0;
pub const MAX_SUPPORTED_VERSION: u8 = 0;

/// Size of the fixed header in bytes: magic 4, checksum 16, flags 4,
/// three count/offset pairs of 8 each, 16 reserved.
pub const HEADER_LEN: usize = 64;

/// Checksum algorithm, recorded in the low two bits of the header
/// flags. The digest always occupies the full 16-byte checksum field;
/// shorter digests are zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMethod {
    /// Fletcher-64 over the pattern section, zero-padded to 16 bytes.
    Fletcher,
    /// SHA-256 over the pattern section, truncated to 16 bytes.
    Sha256,
}

impl ChecksumMethod {
    pub fn from_flags(flags: u32) -> Option<ChecksumMethod> {
        match flags & 0b11 {
            0 => Some(ChecksumMethod::Fletcher),
            1 => Some(ChecksumMethod::Sha256),
            _ => None,
        }
    }

    pub fn flag_bits(&self) -> u32 {
        match self {
            ChecksumMethod::Fletcher => 0,
            ChecksumMethod::Sha256 => 1,
        }
    }

    /// 16-byte digest of `data`.
    pub fn digest(&self, data: &[u8]) -> [u8; 16] {
        let mut out = [0u8; 16];
        match self {
            ChecksumMethod::Fletcher => {
                out[..8].copy_from_slice(&fletcher64(data).to_le_bytes());
            }
            ChecksumMethod::Sha256 => {
                let hash = Sha256::digest(data);
                out.copy_from_slice(&hash[..16]);
            }
        }
        out
    }
}

/// Fletcher-64: paired running sums over little-endian 32-bit words,
/// both reduced modulo 2^32 - 1. A short trailing word is zero-padded.
fn fletcher64(data: &[u8]) -> u64 {
    const MOD: u64 = 0xFFFF_FFFF;
    let mut sum_lo: u64 = 0;
    let mut sum_hi: u64 = 0;
    for chunk in data.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum_lo = (sum_lo + u64::from(u32::from_le_bytes(word))) % MOD;
        sum_hi = (sum_hi + sum_lo) % MOD;
    }
    (sum_hi << 32) | sum_lo
}

/// The fixed 64-byte header of a stored tree file. Counts and offsets
/// describe the node, pattern, and bucket sections that follow; all
/// multi-byte fields are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub checksum: [u8; 16],
    /// Version in the top byte, checksum method in the low two bits.
    pub flags: u32,
    pub node_count: u32,
    pub node_offset: u32,
    pub pattern_count: u32,
    pub pattern_offset: u32,
    pub bucket_count: u32,
    pub bucket_offset: u32,
}

impl FileHeader {
    pub fn version(&self) -> u8 {
        (self.flags >> 24) as u8
    }

    pub fn checksum_method(&self) -> Option<ChecksumMethod> {
        ChecksumMethod::from_flags(self.flags)
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&FILE_MAGIC);
        buf[4..20].copy_from_slice(&self.checksum);
        buf[20..24].copy_from_slice(&self.flags.to_le_bytes());
        buf[24..28].copy_from_slice(&self.node_count.to_le_bytes());
        buf[28..32].copy_from_slice(&self.node_offset.to_le_bytes());
        buf[32..36].copy_from_slice(&self.pattern_count.to_le_bytes());
        buf[36..40].copy_from_slice(&self.pattern_offset.to_le_bytes());
        buf[40..44].copy_from_slice(&self.bucket_count.to_le_bytes());
        buf[44..48].copy_from_slice(&self.bucket_offset.to_le_bytes());
        // Bytes 48..64 stay reserved.
        buf
    }

    pub fn from_bytes(buf: &[u8; HEADER_LEN]) -> Result<FileHeader, HeaderError> {
        if buf[0..4] != FILE_MAGIC {
            return Err(HeaderError::BadMagic);
        }
        let le_u32 = |offset: usize| {
            let mut word = [0u8; 4];
            word.copy_from_slice(&buf[offset..offset + 4]);
            u32::from_le_bytes(word)
        };
        let flags = le_u32(20);
        let version = (flags >> 24) as u8;
        if !(MIN_SUPPORTED_VERSION..=MAX_SUPPORTED_VERSION).contains(&version) {
            return Err(HeaderError::UnsupportedVersion(version));
        }
        if ChecksumMethod::from_flags(flags).is_none() {
            return Err(HeaderError::UnknownChecksumMethod(flags & 0b11));
        }
        let mut checksum = [0u8; 16];
        checksum.copy_from_slice(&buf[4..20]);
        Ok(FileHeader {
            checksum,
            flags,
            node_count: le_u32(24),
            node_offset: le_u32(28),
            pattern_count: le_u32(32),
            pattern_offset: le_u32(36),
            bucket_count: le_u32(40),
            bucket_offset: le_u32(44),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    BadMagic,
    UnsupportedVersion(u8),
    UnknownChecksumMethod(u32),
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::BadMagic => write!(f, "not a tree file (bad magic)"),
            HeaderError::UnsupportedVersion(v) => write!(f, "unsupported file version {v}"),
            HeaderError::UnknownChecksumMethod(bits) => {
                write!(f, "unknown checksum method {bits}")
            }
        }
    }
}

impl Error for HeaderError {}
