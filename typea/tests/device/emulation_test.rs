#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use typea::device::DeviceBuilder;
use typea::target::ResponderState;
use typea::transport::MockTransport;
use typea::types::{EmulationImage, Uid};

/// Register escape (three read-modify-writes), SetParameters and
/// TgInitAsTarget, as consumed before the responder loop starts.
fn script_target_setup(mock: &mut MockTransport) {
    fixtures::script_command(mock, &[0x07, 0x80]);
    fixtures::script_command(mock, &[0x09]);
    fixtures::script_command(mock, &[0x07, 0x80]);
    fixtures::script_command(mock, &[0x09]);
    fixtures::script_command(mock, &[0x07, 0x00]);
    fixtures::script_command(mock, &[0x09]);
    fixtures::script_command(mock, &[0x13]);
    fixtures::script_command(mock, &[0x8D, 0x08]);
}

#[test]
fn emulated_card_serves_its_image_to_a_scripted_reader() {
    let image_bytes = fixtures::sample_image_bytes();
    let uid = fixtures::sample_uid_bytes();

    let mut mock = MockTransport::new();
    fixtures::script_wake(&mut mock);
    script_target_setup(&mut mock);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x26]));
    fixtures::script_command(&mut mock, &[0x91, 0x00]);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x93, 0x20]));
    fixtures::script_command(&mut mock, &[0x91, 0x00]);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x93, 0x70]));
    fixtures::script_command(&mut mock, &[0x91, 0x00]);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x30, 0x02]));
    fixtures::script_command(&mut mock, &[0x91, 0x00]);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x50, 0x00]));

    let mut device = DeviceBuilder::new(mock)
        .build_uninitialized()
        .initialize()
        .unwrap();

    let image = EmulationImage::new(&image_bytes);
    let state = device.emulate(Uid::Single(uid), image).unwrap();
    assert_eq!(state, ResponderState::Halted);

    let replies = fixtures::emulation_replies(device.exchange_mut().transport_mut());
    assert_eq!(replies[0], vec![0x44, 0x00]);
    // Page 2's 16-byte chunk is image bytes 8..24
    assert_eq!(&replies[3][..16], &image_bytes[8..24]);
}

#[test]
fn reader_asking_past_the_image_ends_the_session_as_an_error() {
    let image_bytes = fixtures::sample_image_bytes();
    let uid = fixtures::sample_uid_bytes();

    let mut mock = MockTransport::new();
    fixtures::script_wake(&mut mock);
    script_target_setup(&mut mock);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x26]));
    fixtures::script_command(&mut mock, &[0x91, 0x00]);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x93, 0x20]));
    fixtures::script_command(&mut mock, &[0x91, 0x00]);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x93, 0x70]));
    fixtures::script_command(&mut mock, &[0x91, 0x00]);
    fixtures::script_command(&mut mock, &fixtures::initiator_command_payload(&[0x30, 0x40]));

    let mut device = DeviceBuilder::new(mock)
        .build_uninitialized()
        .initialize()
        .unwrap();

    let image = EmulationImage::new(&image_bytes);
    let err = device.emulate(Uid::Single(uid), image).unwrap_err();
    assert!(matches!(err, typea::Error::PageOutOfRange { .. }));
}
