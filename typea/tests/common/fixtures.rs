// fixtures.rs — commonly used payloads and scripted-transport helpers

#![allow(dead_code)]

use typea::protocol::frame::Frame;
use typea::transport::MockTransport;
use typea::types::Direction;

pub use typea::test_support::{mock_exchange, response_frame, script_command, script_wake};

pub fn sample_uid_bytes() -> [u8; 4] {
    [0xDE, 0xAD, 0xBE, 0xEF]
}

pub fn sample_uid7_bytes() -> [u8; 7] {
    [0x04, 0x13, 0x37, 0x21, 0x43, 0x65, 0x87]
}

pub fn firmware_payload() -> Vec<u8> {
    vec![0x03, 0x32, 0x01, 0x06, 0x07]
}

/// InListPassiveTarget response announcing one Type A target with the
/// given UID.
pub fn passive_target_payload(uid: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x4B, 0x01, 0x01, 0x00, 0x44, 0x00, uid.len() as u8];
    payload.extend_from_slice(uid);
    payload
}

/// InDataExchange read response carrying one 16-byte block.
pub fn data_exchange_payload(block: &[u8; 16]) -> Vec<u8> {
    let mut payload = vec![0x41, 0x00];
    payload.extend_from_slice(block);
    payload
}

/// TgGetInitiatorCommand response relaying one card-layer command.
pub fn initiator_command_payload(command: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x89, 0x00];
    payload.extend_from_slice(command);
    payload
}

/// A 64-byte page image with recognizable contents.
pub fn sample_image_bytes() -> Vec<u8> {
    (0..64).collect()
}

/// Decoded payloads of every frame the test wrote to the chip.
pub fn sent_payloads(mock: &MockTransport) -> Vec<Vec<u8>> {
    mock.written
        .iter()
        .filter_map(|frame| Frame::decode(frame).ok())
        .map(|(_, payload)| payload)
        .collect()
}

/// Decoded payloads of every TgResponseToInitiator frame, i.e. exactly
/// what the emulated card replied on the RF side.
pub fn emulation_replies(mock: &MockTransport) -> Vec<Vec<u8>> {
    mock.written
        .iter()
        .filter_map(|frame| Frame::decode(frame).ok())
        .filter(|(direction, payload)| {
            *direction == Direction::HostToChip && payload.first() == Some(&0x90)
        })
        .map(|(_, payload)| payload[1..].to_vec())
        .collect()
}
