// typea/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport scripting so tests across
//! the crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::cancel::Cancel;
use crate::constants::ACK_FRAME;
use crate::device::exchange::{Exchange, RetryPolicy};
use crate::protocol::frame::Frame;
use crate::transport::mock::MockTransport;
use crate::types::Direction;

/// Frame `payload` as a chip-to-host information frame.
#[doc(hidden)]
pub fn response_frame(payload: &[u8]) -> Vec<u8> {
    Frame::encode(Direction::ChipToHost, payload).unwrap()
}

/// Queue an ACK followed by a framed response, the shape of one healthy
/// command round trip.
#[doc(hidden)]
pub fn script_command(mock: &mut MockTransport, response_payload: &[u8]) {
    mock.push_chunk(ACK_FRAME.to_vec());
    mock.push_chunk(response_frame(response_payload));
}

/// Queue the wake handshake: GetFirmwareVersion then SAMConfiguration
/// responses, as consumed by `Device::initialize`.
#[doc(hidden)]
pub fn script_wake(mock: &mut MockTransport) {
    script_command(mock, &[0x03, 0x32, 0x01, 0x06, 0x07]);
    script_command(mock, &[0x15]);
}

/// An Exchange over a scripted MockTransport with default policy.
#[doc(hidden)]
pub fn mock_exchange(mock: MockTransport) -> Exchange<MockTransport> {
    Exchange::new(mock, RetryPolicy::default(), Cancel::new())
}
