//! # Block Hashes and Chain Locators
//!
//! A chain locator is an ordered, never-empty sequence of block hashes
//! summarizing an indexer's position in the chain: the tip first, then
//! progressively sparser ancestors, ending at the network's genesis hash.
//!
//! The byte codec is the domain-standard layout: a compact-size entry count
//! followed by the raw 32-byte hashes. Decoding is strict; any payload that
//! does not parse exactly is rejected, and the caller decides what a rejected
//! payload means (the checkpoint load path treats it like a missing payload).

use crate::constants::{BLOCK_HASH_LEN, MAX_LOCATOR_ENTRIES};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 32-byte block hash.
///
/// Renders in the conventional reversed byte order used by chain tooling;
/// parsing from hex accepts the same orientation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash([u8; BLOCK_HASH_LEN]);

impl BlockHash {
    pub const fn new(bytes: [u8; BLOCK_HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; BLOCK_HASH_LEN] {
        &self.0
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({self})")
    }
}

/// Error parsing a block hash from hex
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid block hash: {reason}")]
pub struct InvalidBlockHash {
    reason: String,
}

impl FromStr for BlockHash {
    type Err = InvalidBlockHash;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.len() != BLOCK_HASH_LEN * 2 {
            return Err(InvalidBlockHash {
                reason: format!("expected {} hex characters, got {}", BLOCK_HASH_LEN * 2, s.len()),
            });
        }
        let mut bytes = [0u8; BLOCK_HASH_LEN];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let hi = hex_digit(chunk[0]);
            let lo = hex_digit(chunk[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => bytes[BLOCK_HASH_LEN - 1 - i] = (hi << 4) | lo,
                _ => {
                    return Err(InvalidBlockHash {
                        reason: format!("non-hex character at position {}", i * 2),
                    })
                }
            }
        }
        Ok(Self(bytes))
    }
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

/// Errors rejecting a locator payload during decoding
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorDecodeError {
    #[error("Payload truncated: needed {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Non-canonical compact-size length prefix")]
    NonCanonicalLength,

    #[error("Locator entry count {count} exceeds the maximum of {max}")]
    TooManyEntries { count: u64, max: usize },

    #[error("Locator contains no entries")]
    Empty,

    #[error("Payload has {extra} trailing bytes after the last entry")]
    TrailingBytes { extra: usize },
}

/// An ordered, never-empty sequence of block hashes summarizing sync position.
///
/// The final entry is the oldest hash the locator reaches, which for a
/// well-formed locator is the network's genesis hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLocator {
    blocks: Vec<BlockHash>,
}

impl BlockLocator {
    /// Build a locator from an ordered hash sequence, tip first.
    ///
    /// Returns `None` when the sequence is empty or longer than
    /// [`MAX_LOCATOR_ENTRIES`]; both would be unencodable.
    pub fn new(blocks: Vec<BlockHash>) -> Option<Self> {
        if blocks.is_empty() || blocks.len() > MAX_LOCATOR_ENTRIES {
            return None;
        }
        Some(Self { blocks })
    }

    /// The single-entry locator used when no prior progress exists.
    pub fn genesis_only(genesis: BlockHash) -> Self {
        Self {
            blocks: vec![genesis],
        }
    }

    pub fn blocks(&self) -> &[BlockHash] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// The most recent hash in the locator.
    pub fn tip(&self) -> BlockHash {
        self.blocks[0]
    }

    /// The oldest hash in the locator.
    pub fn genesis(&self) -> BlockHash {
        self.blocks[self.blocks.len() - 1]
    }

    /// Encode as a compact-size count followed by the raw hashes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(9 + self.blocks.len() * BLOCK_HASH_LEN);
        write_compact_size(&mut out, self.blocks.len() as u64);
        for hash in &self.blocks {
            out.extend_from_slice(hash.as_bytes());
        }
        out
    }

    /// Decode a locator payload, consuming the input exactly.
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, LocatorDecodeError> {
        let (count, mut offset) = read_compact_size(bytes)?;
        if count == 0 {
            return Err(LocatorDecodeError::Empty);
        }
        if count > MAX_LOCATOR_ENTRIES as u64 {
            return Err(LocatorDecodeError::TooManyEntries {
                count,
                max: MAX_LOCATOR_ENTRIES,
            });
        }
        let count = count as usize;
        let mut blocks = Vec::with_capacity(count);
        for _ in 0..count {
            let end = offset + BLOCK_HASH_LEN;
            let chunk = bytes
                .get(offset..end)
                .ok_or(LocatorDecodeError::Truncated {
                    expected: end,
                    actual: bytes.len(),
                })?;
            let mut hash = [0u8; BLOCK_HASH_LEN];
            hash.copy_from_slice(chunk);
            blocks.push(BlockHash::new(hash));
            offset = end;
        }
        if offset != bytes.len() {
            return Err(LocatorDecodeError::TrailingBytes {
                extra: bytes.len() - offset,
            });
        }
        Ok(Self { blocks })
    }
}

fn write_compact_size(out: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xfc => out.push(value as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

fn read_compact_size(bytes: &[u8]) -> std::result::Result<(u64, usize), LocatorDecodeError> {
    let first = *bytes.first().ok_or(LocatorDecodeError::Truncated {
        expected: 1,
        actual: 0,
    })?;
    let (value, consumed) = match first {
        0xfd => {
            let raw = fixed_slice::<2>(bytes, 1)?;
            (u64::from(u16::from_le_bytes(raw)), 3)
        }
        0xfe => {
            let raw = fixed_slice::<4>(bytes, 1)?;
            (u64::from(u32::from_le_bytes(raw)), 5)
        }
        0xff => {
            let raw = fixed_slice::<8>(bytes, 1)?;
            (u64::from_le_bytes(raw), 9)
        }
        byte => (u64::from(byte), 1),
    };
    let minimal = match value {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    };
    if consumed != minimal {
        return Err(LocatorDecodeError::NonCanonicalLength);
    }
    Ok((value, consumed))
}

fn fixed_slice<const N: usize>(
    bytes: &[u8],
    offset: usize,
) -> std::result::Result<[u8; N], LocatorDecodeError> {
    let chunk = bytes
        .get(offset..offset + N)
        .ok_or(LocatorDecodeError::Truncated {
            expected: offset + N,
            actual: bytes.len(),
        })?;
    let mut out = [0u8; N];
    out.copy_from_slice(chunk);
    Ok(out)
}
