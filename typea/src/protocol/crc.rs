// typea/src/protocol/crc.rs

//! ISO 14443-A CRC_A over card-layer frames.
//!
//! Polynomial x^16 + x^12 + x^5 + 1, preset 0x6363, appended little-endian.

use crate::{Error, Result};

/// Compute CRC_A over `data`.
pub fn crc_a(data: &[u8]) -> u16 {
    let mut acc: u32 = 0x6363;
    for &byte in data {
        let mut b = byte ^ (acc & 0x00FF) as u8;
        b ^= b << 4;
        acc = (acc >> 8) ^ ((b as u32) << 8) ^ ((b as u32) << 3) ^ ((b as u32) >> 4);
    }
    (acc & 0xFFFF) as u16
}

/// Compute CRC_A over all but the last two bytes of `buf` and write it,
/// little-endian, into those last two bytes. The caller pre-sizes the
/// buffer with two placeholder bytes.
pub fn crc_a_append(buf: &mut [u8]) -> Result<()> {
    if buf.len() < 3 {
        return Err(Error::InvalidLength {
            expected: 3,
            actual: buf.len(),
        });
    }
    let crc = crc_a(&buf[..buf.len() - 2]);
    let n = buf.len();
    buf[n - 2] = (crc & 0xFF) as u8;
    buf[n - 1] = (crc >> 8) as u8;
    Ok(())
}

/// Check the trailing little-endian CRC_A of `buf`.
pub fn crc_a_verify(buf: &[u8]) -> bool {
    if buf.len() < 3 {
        return false;
    }
    let crc = crc_a(&buf[..buf.len() - 2]);
    buf[buf.len() - 2] == (crc & 0xFF) as u8 && buf[buf.len() - 1] == (crc >> 8) as u8
}
