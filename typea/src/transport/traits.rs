// typea/src/transport/traits.rs

//! The two hardware seams the crate is written against.

use crate::Result;

/// Byte transport to the front-end chip (serial line, HSU bridge, ...).
///
/// No framing guarantees: a read may return fewer bytes than requested,
/// and the protocol layer assumes two writes are never interleaved by the
/// transport. Physical bring-up (device nodes, baud, mode) happens before
/// a transport is handed to this crate.
pub trait Transport {
    /// Write raw bytes, returning how many were accepted. Writes either
    /// complete or fail within the transport's own hard deadline.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read up to `buf.len()` bytes, waiting at most `timeout_ms`.
    /// Returns 0 on timeout; a timeout is not an error.
    fn read(&mut self, buf: &mut [u8], timeout_ms: u64) -> Result<usize>;
}

/// Full-duplex register bus (SPI path). One transaction shifts two bytes
/// out and two bytes in.
pub trait RegisterBus {
    /// Shift `tx` out while capturing the two bytes shifted back in.
    fn transact(&mut self, tx: [u8; 2]) -> Result<[u8; 2]>;
}
