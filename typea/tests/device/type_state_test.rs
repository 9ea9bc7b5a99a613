#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use typea::device::DeviceBuilder;
use typea::transport::MockTransport;
use typea::types::{PollBaud, Uid};

#[test]
fn builder_to_initialized_device_round_trip() {
    let mut mock = MockTransport::new();
    fixtures::script_wake(&mut mock);

    let device = DeviceBuilder::new(mock)
        .build_uninitialized()
        .initialize()
        .unwrap();
    assert_eq!(device.firmware(), &[0x32, 0x01, 0x06, 0x07]);
}

#[test]
fn initialized_device_polls_and_reads() {
    let uid = fixtures::sample_uid_bytes();
    let block = [0x5A; 16];

    let mut mock = MockTransport::new();
    fixtures::script_wake(&mut mock);
    fixtures::script_command(&mut mock, &fixtures::passive_target_payload(&uid));
    fixtures::script_command(&mut mock, &fixtures::data_exchange_payload(&block));

    let mut device = DeviceBuilder::new(mock)
        .build_uninitialized()
        .initialize()
        .unwrap();

    let identity = device
        .poll_for_uid(PollBaud::TypeA106, 200)
        .unwrap()
        .unwrap();
    assert_eq!(identity.uid, Uid::Single(uid));
    assert_eq!(identity.sak.as_u8(), 0x00);

    assert_eq!(device.read_page(4, 200).unwrap(), block);
}

#[test]
fn initialize_fails_when_chip_is_silent() {
    // Nothing scripted: the wake never gets its firmware answer
    let policy = typea::device::RetryPolicy {
        max_retries: 0,
        ack_timeout_ms: 5,
        response_timeout_ms: 5,
    };
    let device = DeviceBuilder::new(MockTransport::new())
        .with_policy(policy)
        .build_uninitialized();
    assert!(device.initialize().is_err());
}
