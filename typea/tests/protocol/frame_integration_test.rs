#[path = "../common/mod.rs"]
mod common;

use typea::constants::{ACK_FRAME, NACK_FRAME};
use typea::protocol::{Frame, FrameKind};
use typea::types::Direction;
use typea::Error;

#[test]
fn encoded_frame_decodes_to_same_payload() {
    let payload = common::fixtures::firmware_payload();
    let frame = Frame::encode(Direction::ChipToHost, &payload).unwrap();
    let (direction, decoded) = Frame::decode(&frame).unwrap();
    assert_eq!(direction, Direction::ChipToHost);
    assert_eq!(decoded, payload);
}

#[test]
fn short_frames_classify_without_length() {
    assert!(matches!(
        Frame::classify(&ACK_FRAME).unwrap(),
        FrameKind::Ack
    ));
    assert!(matches!(
        Frame::classify(&NACK_FRAME).unwrap(),
        FrameKind::Nack
    ));
}

#[test]
fn classified_length_matches_encoded_length() {
    for n in [0usize, 1, 16, 254] {
        let payload = vec![0xA5; n];
        let frame = Frame::encode(Direction::HostToChip, &payload).unwrap();
        let kind = Frame::classify(&frame).unwrap();
        // LEN counts TFI + payload, so every encoded frame is
        // Information even at n == 0
        assert_eq!(kind, FrameKind::Information { length: n as u8 + 1 });
        assert_eq!(kind.total_len(), frame.len());
    }
}

#[test]
fn extended_frame_marker_is_rejected() {
    // LEN/LCS both 0xFF announces the extended format
    let frame = [0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x00, 0x01];
    assert!(matches!(
        Frame::classify(&frame),
        Err(Error::UnsupportedFrameSize)
    ));
}

#[test]
fn oversized_payload_is_rejected_at_encode() {
    let payload = vec![0x00; 255];
    assert!(matches!(
        Frame::encode(Direction::HostToChip, &payload),
        Err(Error::UnsupportedFrameSize)
    ));
}
