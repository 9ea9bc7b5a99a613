#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use typea::cancel::Cancel;
use typea::device::DeviceBuilder;
use typea::target::ResponderState;
use typea::transport::MockTransport;
use typea::types::{EmulationImage, PollBaud, Uid};

#[test]
fn cancelled_poll_returns_none_not_error() {
    let mut mock = MockTransport::new();
    fixtures::script_wake(&mut mock);

    let cancel = Cancel::new();
    let mut device = DeviceBuilder::new(mock)
        .with_cancel(cancel.clone())
        .build_uninitialized()
        .initialize()
        .unwrap();

    cancel.set();
    // Unbounded wait, yet the cancelled pass comes straight back
    let result = device.poll_for_uid(PollBaud::TypeA106, 0).unwrap();
    assert!(result.is_none());
}

#[test]
fn cancelled_emulation_closes_without_writing() {
    let image_bytes = fixtures::sample_image_bytes();
    let mut mock = MockTransport::new();
    fixtures::script_wake(&mut mock);

    let cancel = Cancel::new();
    let mut device = DeviceBuilder::new(mock)
        .with_cancel(cancel.clone())
        .build_uninitialized()
        .initialize()
        .unwrap();
    let writes_after_init = device.exchange_mut().transport_mut().written.len();

    cancel.set();
    let image = EmulationImage::new(&image_bytes);
    let state = device
        .emulate(Uid::Single(fixtures::sample_uid_bytes()), image)
        .unwrap();
    assert_eq!(state, ResponderState::Idle);
    // Not a single further frame went out
    assert_eq!(
        device.exchange_mut().transport_mut().written.len(),
        writes_after_init
    );
}

#[test]
fn cancel_token_is_shared_across_clones() {
    let outer = Cancel::new();
    let inner = outer.clone();
    assert!(!inner.is_set());
    outer.set();
    assert!(inner.is_set());
}
