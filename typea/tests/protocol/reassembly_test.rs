#[path = "../common/mod.rs"]
mod common;

use typea::cancel::Cancel;
use typea::constants::ACK_FRAME;
use typea::protocol::{Frame, Reassembler};
use typea::transport::MockTransport;
use typea::types::Direction;

#[test]
fn fragmentation_is_invisible_to_the_caller() {
    let payload = common::fixtures::firmware_payload();
    let frame = Frame::encode(Direction::ChipToHost, &payload).unwrap();

    // Whole frame in one chunk
    let mut whole = MockTransport::new();
    whole.push_chunk(frame.clone());
    let mut r = Reassembler::new(512);
    let got_whole = r.read_frame(&mut whole, 100, &Cancel::new()).unwrap();

    // Same frame one byte at a time
    let mut split = MockTransport::new();
    split.push_fragmented(&frame);
    let mut r = Reassembler::new(512);
    let got_split = r.read_frame(&mut split, 100, &Cancel::new()).unwrap();

    assert_eq!(got_whole, got_split);
    assert_eq!(got_whole, frame);
}

#[test]
fn back_to_back_frames_come_out_one_per_call() {
    let first = Frame::encode(Direction::ChipToHost, &[0x03, 0x32]).unwrap();
    let second = Frame::encode(Direction::ChipToHost, &[0x15]).unwrap();

    let mut joined = ACK_FRAME.to_vec();
    joined.extend_from_slice(&first);
    joined.extend_from_slice(&second);

    let mut mock = MockTransport::new();
    mock.push_chunk(joined);

    let mut r = Reassembler::new(512);
    let cancel = Cancel::new();
    assert_eq!(r.read_frame(&mut mock, 100, &cancel).unwrap(), ACK_FRAME);
    assert_eq!(r.read_frame(&mut mock, 100, &cancel).unwrap(), first);
    // Third call needs no transport data at all: the frame was carried
    // over in the cursor.
    assert_eq!(r.read_frame(&mut mock, 100, &cancel).unwrap(), second);
}

#[test]
fn garbage_then_clean_frame_recovers() {
    let clean = Frame::encode(Direction::ChipToHost, &[0x03]).unwrap();

    let mut mock = MockTransport::new();
    // Line noise that can never classify as a frame
    mock.push_chunk(vec![0x00, 0x00, 0xFF, 0x12, 0x34]);
    mock.push_chunk(clean.clone());

    let mut r = Reassembler::new(512);
    let cancel = Cancel::new();
    // The corrupt prefix surfaces once as an error and flushes the cursor
    assert!(r.read_frame(&mut mock, 50, &cancel).is_err());
    assert_eq!(r.read_frame(&mut mock, 100, &cancel).unwrap(), clean);
}
