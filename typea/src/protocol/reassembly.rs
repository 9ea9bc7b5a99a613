// typea/src/protocol/reassembly.rs

//! Reassembles exactly one framed message at a time out of arbitrarily
//! fragmented transport reads.
//!
//! The transport gives no framing guarantees: a read may return any byte
//! count from zero up to the remaining buffer space, and a single read may
//! span the tail of one frame and the head of the next. The reassembler
//! owns the carry-over cursor that preserves those surplus bytes between
//! calls.

use std::time::Instant;

use log::{debug, trace, warn};

use crate::cancel::Cancel;
use crate::protocol::frame::{Frame, FrameKind};
use crate::transport::Transport;
use crate::utils::{CHIP_RESPONSE_SLICE_MS, blocks_forever, bytes_to_hex_spaced};
use crate::{Error, Result};

/// Minimum buffered byte count before a frame can be classified:
/// preamble(3) + LEN + the byte after it.
const CLASSIFY_THRESHOLD: usize = 5;

/// Frame reassembler with a bounded carry-over cursor.
pub struct Reassembler {
    buf: Vec<u8>,
    capacity: usize,
}

impl Reassembler {
    /// Create a reassembler whose cursor holds at most `capacity` bytes,
    /// which bounds the largest decodable frame.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Byte count currently carried over from previous reads.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Discard any buffered partial data. Chip behavior after a timeout
    /// is undefined, so a fresh frame boundary is the only safe state.
    pub fn reset(&mut self) {
        if !self.buf.is_empty() {
            debug!("discarding {} buffered bytes", self.buf.len());
        }
        self.buf.clear();
    }

    /// Read one complete frame from `transport`.
    ///
    /// `timeout_ms` bounds the whole assembly; 0 blocks indefinitely.
    /// On timeout the cursor is reset and partial data is discarded, not
    /// resumed. A set cancel token yields `Ok(vec![])` so callers can
    /// wind down without treating shutdown as a failure.
    pub fn read_frame<T: Transport + ?Sized>(
        &mut self,
        transport: &mut T,
        timeout_ms: u64,
        cancel: &Cancel,
    ) -> Result<Vec<u8>> {
        let started = Instant::now();

        loop {
            if let Some(frame) = self.try_extract()? {
                trace!("frame: {}", bytes_to_hex_spaced(&frame));
                return Ok(frame);
            }

            if cancel.is_set() {
                return Ok(Vec::new());
            }

            if !blocks_forever(timeout_ms)
                && started.elapsed().as_millis() as u64 >= timeout_ms
            {
                let collected = self.buf.len();
                self.reset();
                debug!("timed out with {collected} bytes collected");
                return Err(Error::ResponseTimeout);
            }

            let mut chunk = [0u8; 256];
            let room = self.capacity - self.buf.len();
            if room == 0 {
                let needed = self.declared_total().unwrap_or(self.capacity + 1);
                let capacity = self.capacity;
                self.reset();
                return Err(Error::BufferOverflow { needed, capacity });
            }
            let want = room.min(chunk.len());
            let n = transport.read(&mut chunk[..want], CHIP_RESPONSE_SLICE_MS)?;
            if n > 0 {
                self.buf.extend_from_slice(&chunk[..n]);
            }

            if cancel.is_set() {
                return Ok(Vec::new());
            }
        }
    }

    /// Declared on-wire total for the currently buffered prefix, if it
    /// can be classified yet.
    fn declared_total(&self) -> Option<usize> {
        if self.buf.len() < CLASSIFY_THRESHOLD {
            return None;
        }
        Frame::classify(&self.buf).ok().map(|k| k.total_len())
    }

    /// Pop a complete frame off the front of the cursor if one is fully
    /// buffered, shifting any surplus bytes (the start of the next
    /// frame) to the front for the next call.
    fn try_extract(&mut self) -> Result<Option<Vec<u8>>> {
        if self.buf.len() < CLASSIFY_THRESHOLD {
            return Ok(None);
        }

        let kind = match Frame::classify(&self.buf) {
            Ok(kind) => kind,
            Err(Error::UnsupportedFrameSize) => {
                self.reset();
                return Err(Error::UnsupportedFrameSize);
            }
            Err(err) => {
                // Lost sync; nothing downstream can recover this stream
                self.reset();
                return Err(err);
            }
        };

        let total = kind.total_len();
        if total > self.capacity {
            self.reset();
            return Err(Error::BufferOverflow {
                needed: total,
                capacity: self.capacity,
            });
        }
        if self.buf.len() < total {
            return Ok(None);
        }

        let frame: Vec<u8> = self.buf.drain(..total).collect();
        if let FrameKind::Information { .. } = kind {
            let postamble = frame[total - 1];
            if postamble != crate::constants::FRAME_POSTAMBLE {
                warn!("postamble {postamble:#04x} instead of 0x00");
            }
        }
        Ok(Some(frame))
    }
}
