// typea/src/types.rs

//! Card-layer value types: UID, ATQA, SAK and friends.

use crate::Error;
use std::convert::TryFrom;

/// ISO 14443-A UID - Newtype Pattern (4 or 7 bytes)
///
/// Single-size UIDs complete at cascade level 1; double-size UIDs carry a
/// cascade tag at level 1 and finish at level 2. Triple-size (10 byte)
/// UIDs are not produced by the supported card models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Uid {
    /// 4-byte single-size UID
    Single([u8; 4]),
    /// 7-byte double-size UID
    Double([u8; 7]),
}

impl Uid {
    /// The UID bytes in transmission order.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Single(b) => b,
            Self::Double(b) => b,
        }
    }

    /// Byte count: 4 or 7.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// A UID is never empty; present for clippy's `len` convention.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lowercase hex rendering without separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.len() {
            4 => {
                let mut arr = [0u8; 4];
                arr.copy_from_slice(bytes);
                Ok(Self::Single(arr))
            }
            7 => {
                let mut arr = [0u8; 7];
                arr.copy_from_slice(bytes);
                Ok(Self::Double(arr))
            }
            other => Err(Error::InvalidLength {
                expected: 4,
                actual: other,
            }),
        }
    }
}

/// ATQA - 2-byte answer to REQA, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atqa([u8; 2]);

impl Atqa {
    /// Wrap the two ATQA bytes as they arrived on the wire.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    /// The raw bytes, still in wire order.
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Atqa {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 2 {
            return Err(Error::InvalidLength {
                expected: 2,
                actual: bytes.len(),
            });
        }
        Ok(Self([bytes[0], bytes[1]]))
    }
}

/// SAK - select acknowledge byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sak(u8);

impl Sak {
    /// Wrap a raw SAK byte.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// The raw SAK byte.
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Bit 2 set means the UID is incomplete and another cascade level
    /// is required.
    pub fn cascade_pending(&self) -> bool {
        self.0 & 0x04 != 0
    }
}

/// Identity of a selected card, assembled once per polling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardIdentity {
    /// Complete UID after all cascade levels
    pub uid: Uid,
    /// Answer to the initial REQA
    pub atqa: Atqa,
    /// Final select acknowledge
    pub sak: Sak,
}

impl CardIdentity {
    /// Assemble an identity from its three anticollision artifacts.
    pub fn new(uid: Uid, atqa: Atqa, sak: Sak) -> Self {
        Self { uid, atqa, sak }
    }
}

/// TFI direction byte of an information frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 0xD4: host to front-end
    HostToChip,
    /// 0xD5: front-end to host
    ChipToHost,
}

impl Direction {
    /// The on-wire TFI byte.
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::HostToChip => crate::constants::DIR_HOST_TO_CHIP,
            Self::ChipToHost => crate::constants::DIR_CHIP_TO_HOST,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            crate::constants::DIR_HOST_TO_CHIP => Ok(Self::HostToChip),
            crate::constants::DIR_CHIP_TO_HOST => Ok(Self::ChipToHost),
            other => Err(Error::MalformedFrame(format!(
                "unknown direction byte {other:#04x}"
            ))),
        }
    }
}

/// Baud/type selector for InListPassiveTarget
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollBaud {
    /// 106 kbps ISO 14443 Type A
    TypeA106 = 0x00,
}

/// Fake card identity for TgInitAsTarget. The chip only takes the first
/// three UID bytes; it fabricates byte 0 (0x08 for random-UID cards).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetConfig {
    /// TgInitAsTarget mode bits (see [`crate::constants::target_mode`])
    pub mode: u8,
    /// SENS_RES (ATQA) in wire order
    pub sens_res: [u8; 2],
    /// UID bytes 1..=3 as presented during anticollision
    pub uid_prefix: [u8; 3],
    /// SEL_RES (SAK)
    pub sel_res: u8,
}

impl TargetConfig {
    /// Passive-only ISO 14443-A target with ATQA 44 00 and SAK 0x00
    /// (NTAG-like, double-size UID announced).
    pub fn ntag_like(uid_prefix: [u8; 3]) -> Self {
        Self {
            mode: crate::constants::target_mode::PASSIVE_ONLY,
            sens_res: [0x44, 0x00],
            uid_prefix,
            sel_res: 0x00,
        }
    }
}

/// Caller-owned card memory image served by the emulation responder.
///
/// Pages are 4 bytes; a read-page reply returns 16 bytes (4 pages), the
/// NTAG/Ultralight read semantics. The responder never mutates the image.
#[derive(Debug, Clone, Copy)]
pub struct EmulationImage<'a> {
    data: &'a [u8],
}

/// Bytes per page on the emulated card model
pub const PAGE_SIZE: usize = 4;
/// Bytes returned by one read-page exchange
pub const READ_CHUNK: usize = 16;

impl<'a> EmulationImage<'a> {
    /// Borrow `data` as the card memory; partial trailing pages are
    /// ignored.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Number of whole pages in the image
    pub fn pages(&self) -> usize {
        self.data.len() / PAGE_SIZE
    }

    /// Copy the 16-byte read chunk starting at `page`. The whole chunk
    /// must lie inside the image.
    pub fn read_chunk(&self, page: usize) -> crate::Result<[u8; READ_CHUNK]> {
        let start = page
            .checked_mul(PAGE_SIZE)
            .ok_or(Error::PageOutOfRange {
                page,
                pages: self.pages(),
            })?;
        let end = start + READ_CHUNK;
        if end > self.data.len() {
            return Err(Error::PageOutOfRange {
                page,
                pages: self.pages(),
            });
        }
        let mut out = [0u8; READ_CHUNK];
        out.copy_from_slice(&self.data[start..end]);
        Ok(out)
    }
}
