// typea/src/device/exchange.rs

//! The send-frame / await-ACK / await-response handshake with the chip.
//!
//! This is the synchronization point between host and chip: every framed
//! command funnels through [`Exchange::send_command`]. The transport is
//! exclusively owned here for the session's duration.

use log::{debug, trace, warn};

use crate::cancel::Cancel;
use crate::constants::{MAX_PAYLOAD_LEN, SamMode, WAKE_PREAMBLE, cmd};
use crate::protocol::frame::{Frame, FrameKind};
use crate::protocol::reassembly::Reassembler;
use crate::transport::Transport;
use crate::types::Direction;
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Retry and timeout knobs for the handshake, passed at construction
/// instead of living in globals.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Full re-sends allowed after the first attempt
    pub max_retries: u32,
    /// ACK deadline per attempt in milliseconds
    pub ack_timeout_ms: u64,
    /// Response deadline per attempt in milliseconds, when the caller
    /// passes no explicit per-call timeout
    pub response_timeout_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            ack_timeout_ms: 100,
            response_timeout_ms: crate::utils::DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

/// Command/response engine over a byte transport.
pub struct Exchange<T: Transport> {
    transport: T,
    reassembler: Reassembler,
    policy: RetryPolicy,
    cancel: Cancel,
}

/// Cursor capacity: worst-case information frame plus one full extra
/// frame of read-ahead.
const CURSOR_CAPACITY: usize = 2 * (MAX_PAYLOAD_LEN + 8);

impl<T: Transport> Exchange<T> {
    /// Take ownership of `transport` for the session.
    pub fn new(transport: T, policy: RetryPolicy, cancel: Cancel) -> Self {
        Self {
            transport,
            reassembler: Reassembler::new(CURSOR_CAPACITY),
            policy,
            cancel,
        }
    }

    /// The cancellation token polled at every suspension point.
    pub fn cancel(&self) -> Cancel {
        self.cancel.clone()
    }

    /// Direct transport access, mainly for inspection in tests.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Send `payload` as an information frame and return the response
    /// frame's payload (response code included).
    ///
    /// `timeout_ms` bounds the response wait and is re-armed on every
    /// retry; 0 blocks indefinitely. A missing or garbled ACK is not
    /// fatal: the chip may coalesce ACK and response or skip the ACK
    /// under load, so the response wait proceeds regardless. The frame
    /// is only ever re-sent while neither an ACK nor a response has
    /// been seen; an acknowledged command that then times out fails
    /// without a re-send. When the cancel token is set, returns an
    /// empty payload instead of an error.
    pub fn send_command(
        &mut self,
        payload: &[u8],
        response_capacity: usize,
        timeout_ms: u64,
    ) -> Result<Vec<u8>> {
        let frame = Frame::encode(Direction::HostToChip, payload)?;
        let mut ack_seen = false;

        for attempt in 0..=self.policy.max_retries {
            if self.cancel.is_set() {
                return Ok(Vec::new());
            }
            if attempt > 0 {
                debug!("re-sending command {:#04x}, attempt {attempt}", payload[0]);
            }

            trace!("-> {}", bytes_to_hex_spaced(&frame));
            let written = self.transport.write(&frame)?;
            if written != frame.len() {
                return Err(Error::TransportWrite(format!(
                    "short write: {written} of {} bytes",
                    frame.len()
                )));
            }

            // ACK phase. The per-call timeout also bounds the ACK wait,
            // except that an unbounded call still keeps a finite ACK
            // deadline so a dead chip cannot hang us before the real
            // (intentionally unbounded) response wait.
            let ack_timeout = if timeout_ms == 0 {
                self.policy.ack_timeout_ms
            } else {
                timeout_ms.min(self.policy.ack_timeout_ms)
            };
            match self.reassembler.read_frame(&mut self.transport, ack_timeout, &self.cancel) {
                Ok(buf) if buf.is_empty() => return Ok(Vec::new()),
                Ok(buf) if Frame::is_ack(&buf) => {
                    ack_seen = true;
                }
                Ok(buf) => match Frame::classify(&buf) {
                    // Coalesced: the frame in the ACK slot already is
                    // the response. Error frames land here too and
                    // surface as ChipError out of the decode.
                    Ok(FrameKind::Information { .. }) => {
                        return self.accept_response(&buf, response_capacity);
                    }
                    Ok(FrameKind::Nack) => {
                        warn!("NACK where ACK expected, waiting for response anyway");
                    }
                    other => {
                        warn!("unexpected frame in ACK slot ({other:?}), proceeding");
                    }
                },
                Err(Error::ResponseTimeout) => {
                    warn!("no ACK within {ack_timeout} ms, awaiting response anyway");
                }
                Err(err) => return Err(err),
            }

            // Response phase
            match self.reassembler.read_frame(&mut self.transport, timeout_ms, &self.cancel) {
                Ok(buf) if buf.is_empty() => return Ok(Vec::new()),
                Ok(buf) => return self.accept_response(&buf, response_capacity),
                Err(Error::ResponseTimeout) => {
                    // Re-sending an acknowledged command could execute
                    // it twice on the chip; retries are only for frames
                    // the chip never saw.
                    if ack_seen {
                        return Err(Error::ResponseTimeout);
                    }
                    if attempt == self.policy.max_retries {
                        return Err(Error::AckTimeout);
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(Error::ResponseTimeout)
    }

    fn accept_response(&mut self, buf: &[u8], response_capacity: usize) -> Result<Vec<u8>> {
        let (direction, payload) = Frame::decode(buf)?;
        if direction != Direction::ChipToHost {
            return Err(Error::MalformedFrame(
                "response frame has host direction byte".into(),
            ));
        }
        if payload.len() > response_capacity {
            return Err(Error::BufferOverflow {
                needed: payload.len(),
                capacity: response_capacity,
            });
        }
        Ok(payload)
    }

    /// Send chip command `code` with `args`; validate the echoed
    /// response code and return the response arguments.
    pub fn command(&mut self, code: u8, args: &[u8], timeout_ms: u64) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(1 + args.len());
        payload.push(code);
        payload.extend_from_slice(args);

        let resp = self.send_command(&payload, MAX_PAYLOAD_LEN, timeout_ms)?;
        if resp.is_empty() {
            // cancelled
            return Ok(resp);
        }

        let expected = cmd::response(code);
        if resp[0] != expected {
            return Err(Error::UnexpectedResponse {
                expected,
                actual: resp[0],
            });
        }
        Ok(resp[1..].to_vec())
    }

    /// Wake the chip from low-power mode and confirm it answers by
    /// fetching the firmware version.
    pub fn wake(&mut self) -> Result<Vec<u8>> {
        let written = self.transport.write(&WAKE_PREAMBLE)?;
        if written != WAKE_PREAMBLE.len() {
            return Err(Error::TransportWrite(format!(
                "short wake write: {written} of {} bytes",
                WAKE_PREAMBLE.len()
            )));
        }
        self.firmware_version()
    }

    /// GetFirmwareVersion: returns IC, version, revision and support
    /// bytes.
    pub fn firmware_version(&mut self) -> Result<Vec<u8>> {
        self.command(
            cmd::GET_FIRMWARE_VERSION,
            &[],
            self.policy.response_timeout_ms,
        )
    }

    /// SAMConfiguration: selects how the (absent) secure element is
    /// wired. `Normal` activates the chip for standalone use.
    pub fn configure(&mut self, mode: SamMode) -> Result<()> {
        let resp = self.command(
            cmd::SAM_CONFIGURATION,
            &[mode as u8, 0x00],
            self.policy.response_timeout_ms,
        )?;
        trace!("SAM configured: {}", bytes_to_hex_spaced(&resp));
        Ok(())
    }

    /// SetParameters: replace the chip's internal flag byte controlling
    /// automatic target-mode behaviors.
    pub fn set_parameters(&mut self, flags: u8) -> Result<()> {
        self.command(
            cmd::SET_PARAMETERS,
            &[flags],
            self.policy.response_timeout_ms,
        )?;
        Ok(())
    }

    /// RFConfiguration: tune an RF configuration item.
    pub fn rf_configuration(&mut self, item: u8, data: &[u8]) -> Result<()> {
        let mut args = Vec::with_capacity(1 + data.len());
        args.push(item);
        args.extend_from_slice(data);
        self.command(cmd::RF_CONFIGURATION, &args, self.policy.response_timeout_ms)?;
        Ok(())
    }
}
