// typea/src/transport/mock.rs

//! Scripted in-memory stand-ins for the transport and register-bus
//! seams.

use std::collections::VecDeque;

use crate::transport::traits::{RegisterBus, Transport};
use crate::{Error, Result};

/// Mock transport for unit tests. Records written frames and replays
/// scripted read chunks.
///
/// Chunks are deliberately independent of read-call boundaries: a chunk
/// larger than the caller's buffer is handed out across several reads,
/// and an exhausted queue reads as a timeout (0 bytes). Pushing one byte
/// per chunk exercises worst-case fragmentation in the reassembler.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every write() payload, in call order
    pub written: Vec<Vec<u8>>,
    chunks: VecDeque<Vec<u8>>,
    /// Number of upcoming write calls that should fail (for tests)
    pub write_failures: usize,
}

impl MockTransport {
    /// Empty mock: no scripted reads, no recorded writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one read chunk.
    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        self.chunks.push_back(chunk);
    }

    /// Queue a byte sequence split into single-byte chunks.
    pub fn push_fragmented(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.chunks.push_back(vec![b]);
        }
    }

    /// Make the next `n` write calls fail.
    pub fn fail_writes(&mut self, n: usize) {
        self.write_failures = n;
    }

    /// Most recent write() payload, if any.
    pub fn last_written(&self) -> Option<&Vec<u8>> {
        self.written.last()
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        if self.write_failures > 0 {
            self.write_failures -= 1;
            return Err(Error::TransportWrite("scripted failure".into()));
        }
        self.written.push(data.to_vec());
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8], _timeout_ms: u64) -> Result<usize> {
        let Some(chunk) = self.chunks.front_mut() else {
            return Ok(0); // scripted timeout
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n == chunk.len() {
            self.chunks.pop_front();
        } else {
            chunk.drain(..n);
        }
        Ok(n)
    }
}

/// Mock register bus for the SPI path. Records transactions and replays
/// scripted responses.
#[derive(Debug, Default)]
pub struct MockBus {
    /// Every transmitted byte pair, in call order
    pub transactions: Vec<[u8; 2]>,
    responses: VecDeque<[u8; 2]>,
}

impl MockBus {
    /// Empty mock bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the byte pair the next transaction shifts back in.
    pub fn push_response(&mut self, rx: [u8; 2]) {
        self.responses.push_back(rx);
    }
}

impl RegisterBus for MockBus {
    fn transact(&mut self, tx: [u8; 2]) -> Result<[u8; 2]> {
        self.transactions.push(tx);
        Ok(self.responses.pop_front().unwrap_or([0, 0]))
    }
}
