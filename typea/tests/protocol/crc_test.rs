use typea::protocol::{crc_a, crc_a_append, crc_a_verify};

#[test]
fn select_frame_crc_is_stable() {
    // SEL_REQ CL1 for UID DE AD BE EF; the CRC must be identical on
    // every run for replies to ever match the reader's expectation.
    let uid = [0xDE, 0xAD, 0xBE, 0xEF];
    let bcc = uid.iter().fold(0u8, |a, b| a ^ b);
    let mut sel = vec![0x93, 0x70, uid[0], uid[1], uid[2], uid[3], bcc, 0, 0];
    crc_a_append(&mut sel).unwrap();

    let mut again = sel.clone();
    again.truncate(sel.len() - 2);
    again.extend_from_slice(&[0, 0]);
    crc_a_append(&mut again).unwrap();

    assert_eq!(sel, again);
    assert!(crc_a_verify(&sel));
}

#[test]
fn crc_distinguishes_close_inputs() {
    assert_ne!(crc_a(&[0x30, 0x04]), crc_a(&[0x30, 0x05]));
    assert_ne!(crc_a(&[0x50, 0x00]), crc_a(&[0x00, 0x50]));
}

#[test]
fn corrupted_body_fails_verification() {
    let mut halt = vec![0x50, 0x00, 0, 0];
    crc_a_append(&mut halt).unwrap();
    assert!(crc_a_verify(&halt));

    halt[1] ^= 0x01;
    assert!(!crc_a_verify(&halt));
}
