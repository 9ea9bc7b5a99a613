// typea/src/protocol/frame.rs

//! Encoding, classification and decoding of single frames.

use log::warn;

use crate::constants::{
    self, ERROR_FRAME_LEN, ERROR_TFI, EXTENDED_FRAME_MARKER, FRAME_OVERHEAD, FRAME_POSTAMBLE,
    FRAME_PREAMBLE, MAX_PAYLOAD_LEN, SHORT_FRAME_LEN,
};
use crate::protocol::checksum::{dcs, lcs};
use crate::types::Direction;
use crate::{Error, Result};

/// Classification of an incoming frame, driven by the length byte at
/// offset 3.
///
/// Layout of an information frame:
/// `[00 00 FF] [LEN] [LCS] [TFI] [payload] [DCS] [00]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Fixed 6-byte ACK short frame
    Ack,
    /// Fixed 6-byte NACK short frame
    Nack,
    /// Information frame; `length` counts TFI + payload bytes. Error
    /// frames classify here too (an error frame is a zero-payload frame
    /// with the [`ERROR_TFI`] direction byte, which only [`Frame::decode`]
    /// can see).
    Information { length: u8 },
}

impl FrameKind {
    /// Total on-wire byte count for this kind of frame.
    pub fn total_len(&self) -> usize {
        match self {
            Self::Ack | Self::Nack => SHORT_FRAME_LEN,
            // preamble(3) + len(1) + lcs(1) + LEN bytes (TFI + payload)
            // + dcs(1) + postamble(1)
            Self::Information { length } => *length as usize + FRAME_OVERHEAD,
        }
    }
}

/// Frame codec: encoding of outgoing information frames, classification
/// and validated decoding of incoming ones.
pub struct Frame;

impl Frame {
    /// Encode `payload` into a full information frame for `direction`.
    pub fn encode(direction: Direction, payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() >= MAX_PAYLOAD_LEN {
            // LEN also counts the TFI byte, so 255 payload bytes would
            // need the extended format
            return Err(Error::UnsupportedFrameSize);
        }

        let tfi = direction.as_u8();
        let len = payload.len() as u8 + 1;
        let mut out = Vec::with_capacity(payload.len() + FRAME_OVERHEAD + 1);
        out.extend_from_slice(&FRAME_PREAMBLE);
        out.push(len);
        out.push(lcs(len));
        out.push(tfi);
        out.extend_from_slice(payload);
        out.push(dcs(tfi, payload));
        out.push(FRAME_POSTAMBLE);
        Ok(out)
    }

    /// Classify a buffered frame prefix. Requires at least 5 bytes (up to
    /// and including the byte after LEN); never inspects more bytes than
    /// the declared kind guarantees.
    pub fn classify(buf: &[u8]) -> Result<FrameKind> {
        if buf.len() < 5 {
            return Err(Error::InvalidLength {
                expected: 5,
                actual: buf.len(),
            });
        }
        if buf[..3] != FRAME_PREAMBLE {
            return Err(Error::MalformedFrame(format!(
                "bad preamble: {}",
                crate::utils::bytes_to_hex_spaced(&buf[..3])
            )));
        }

        match (buf[3], buf[4]) {
            (0x00, 0xFF) => Ok(FrameKind::Ack),
            (0xFF, 0x00) => Ok(FrameKind::Nack),
            (EXTENDED_FRAME_MARKER, EXTENDED_FRAME_MARKER) => Err(Error::UnsupportedFrameSize),
            (len, lcs_actual) => {
                let lcs_expected = lcs(len);
                if lcs_actual != lcs_expected {
                    return Err(Error::ChecksumMismatch {
                        expected: lcs_expected,
                        actual: lcs_actual,
                    });
                }
                Ok(FrameKind::Information { length: len })
            }
        }
    }

    /// Decode a complete information frame, validating LCS and DCS.
    /// Returns the direction byte and the payload (without TFI).
    ///
    /// An application-level error frame (TFI `0x7F`) surfaces as
    /// [`Error::ChipError`]. A postamble mismatch is logged and
    /// tolerated; some chip revisions clip it under load. Checksum
    /// mismatches are fatal for the frame.
    pub fn decode(frame: &[u8]) -> Result<(Direction, Vec<u8>)> {
        let kind = Self::classify(frame)?;
        let length = match kind {
            FrameKind::Information { length } => length,
            FrameKind::Ack | FrameKind::Nack => {
                return Err(Error::MalformedFrame("short frame has no payload".into()));
            }
        };

        let required = kind.total_len();
        if frame.len() < required {
            return Err(Error::InvalidLength {
                expected: required,
                actual: frame.len(),
            });
        }

        let tfi = frame[5];
        if tfi == ERROR_TFI {
            return Err(Error::ChipError(Self::error_code(frame)?));
        }
        let direction = Direction::try_from(tfi)?;
        let payload = &frame[6..6 + length as usize - 1];

        let dcs_actual = frame[5 + length as usize];
        let dcs_expected = dcs(tfi, payload);
        if dcs_actual != dcs_expected {
            return Err(Error::ChecksumMismatch {
                expected: dcs_expected,
                actual: dcs_actual,
            });
        }

        let postamble = frame[6 + length as usize];
        if postamble != FRAME_POSTAMBLE {
            warn!("postamble {postamble:#04x} instead of 0x00, accepting frame anyway");
        }

        Ok((direction, payload.to_vec()))
    }

    /// Error code carried by a complete 8-byte error frame.
    pub fn error_code(frame: &[u8]) -> Result<u8> {
        if frame.len() < ERROR_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: ERROR_FRAME_LEN,
                actual: frame.len(),
            });
        }
        Ok(frame[6])
    }

    /// True when `buf` is exactly the ACK short frame.
    pub fn is_ack(buf: &[u8]) -> bool {
        buf == constants::ACK_FRAME
    }
}
