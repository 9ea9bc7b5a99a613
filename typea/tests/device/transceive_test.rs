#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use common::fixtures;
use typea::cancel::Cancel;
use typea::initiator::{Anticollision, ChipTransceive, Transceive};
use typea::transport::MockTransport;
use typea::types::Uid;

#[test]
fn seven_bit_frame_wraps_exchange_in_bit_framing_writes() {
    let mut mock = MockTransport::new();
    fixtures::script_command(&mut mock, &[0x09]); // BitFraming <- 7
    fixtures::script_command(&mut mock, &[0x43, 0x00, 0x44, 0x00]); // ATQA back
    fixtures::script_command(&mut mock, &[0x09]); // BitFraming <- 0

    let mut ex = fixtures::mock_exchange(mock);
    let mut tx = ChipTransceive::new(&mut ex);
    let resp = tx.transceive_bits(&[0x26], 7, 100).unwrap();
    assert_eq!(resp, vec![0x44, 0x00]);

    let sent = fixtures::sent_payloads(ex.transport_mut());
    assert_eq!(sent[0], vec![0x08, 0x63, 0x3D, 0x07]);
    assert_eq!(sent[1], vec![0x42, 0x26]);
    assert_eq!(sent[2], vec![0x08, 0x63, 0x3D, 0x00]);
}

#[test]
fn rf_timeout_status_maps_to_response_timeout() {
    let mut mock = MockTransport::new();
    fixtures::script_command(&mut mock, &[0x43, 0x01]);

    let mut ex = fixtures::mock_exchange(mock);
    let mut tx = ChipTransceive::new(&mut ex);
    assert!(matches!(
        tx.transceive_bytes(&[0x93, 0x20], 100),
        Err(typea::Error::ResponseTimeout)
    ));
}

#[test]
fn full_anticollision_over_the_chip_path() {
    let uid = fixtures::sample_uid_bytes();
    let bcc = uid.iter().fold(0u8, |a, b| a ^ b);

    let mut mock = MockTransport::new();
    // REQA as a 7-bit frame (bit framing on, exchange, bit framing off)
    fixtures::script_command(&mut mock, &[0x09]);
    fixtures::script_command(&mut mock, &[0x43, 0x00, 0x44, 0x00]);
    fixtures::script_command(&mut mock, &[0x09]);
    // SDD_REQ CL1
    fixtures::script_command(&mut mock, &[0x43, 0x00, uid[0], uid[1], uid[2], uid[3], bcc]);
    // SEL_REQ CL1
    fixtures::script_command(&mut mock, &[0x43, 0x00, 0x00]);

    let mut ex = fixtures::mock_exchange(mock);
    let mut tx = ChipTransceive::new(&mut ex);
    let identity = Anticollision::new(&mut tx, Cancel::new())
        .with_backoff(Duration::ZERO)
        .poll_for_uid()
        .unwrap()
        .unwrap();

    assert_eq!(identity.uid, Uid::Single(uid));
    assert_eq!(identity.atqa.as_bytes(), &[0x44, 0x00]);
}
