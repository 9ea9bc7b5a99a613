#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use typea::cancel::Cancel;
use typea::constants::{cmd, ACK_FRAME};
use typea::device::{Exchange, RetryPolicy};
use typea::transport::MockTransport;
use typea::Error;

fn tight_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        ack_timeout_ms: 5,
        response_timeout_ms: 5,
    }
}

#[test]
fn each_retry_resends_the_identical_frame() {
    let mock = MockTransport::new();
    let mut ex = Exchange::new(mock, tight_policy(2), Cancel::new());

    let _ = ex.send_command(&[0x02], 64, 5);

    let written = &ex.transport_mut().written;
    assert_eq!(written.len(), 3);
    assert_eq!(written[0], written[1]);
    assert_eq!(written[1], written[2]);
}

#[test]
fn response_after_ack_timeout_still_counts() {
    let mut mock = MockTransport::new();
    // No ACK at all, only the (late) response
    mock.push_chunk(fixtures::response_frame(&[0x03, 0x32]));

    let mut ex = Exchange::new(mock, tight_policy(0), Cancel::new());
    let resp = ex.command(cmd::GET_FIRMWARE_VERSION, &[], 100).unwrap();
    assert_eq!(resp, vec![0x32]);
}

#[test]
fn ack_seen_changes_the_final_error_kind() {
    // With the ACK delivered but no response, the terminal error is a
    // response timeout rather than an ACK timeout.
    let mut mock = MockTransport::new();
    mock.push_chunk(ACK_FRAME.to_vec());

    let mut ex = Exchange::new(mock, tight_policy(0), Cancel::new());
    let err = ex.send_command(&[0x02], 64, 5).unwrap_err();
    assert!(matches!(err, Error::ResponseTimeout));
}

#[test]
fn acknowledged_command_is_never_resent() {
    // The chip ACKed, so it is already executing the command. A response
    // timeout must fail the call instead of writing the frame again,
    // which could execute the command twice.
    let mut mock = MockTransport::new();
    mock.push_chunk(ACK_FRAME.to_vec());

    let mut ex = Exchange::new(mock, tight_policy(2), Cancel::new());
    let err = ex.send_command(&[0x40, 0x01, 0x30, 0x02], 64, 5).unwrap_err();
    assert!(matches!(err, Error::ResponseTimeout));
    assert_eq!(ex.transport_mut().written.len(), 1);
}

#[test]
fn response_larger_than_caller_capacity_overflows() {
    let mut mock = MockTransport::new();
    mock.push_chunk(ACK_FRAME.to_vec());
    mock.push_chunk(fixtures::response_frame(&[0x41; 32]));

    let mut ex = Exchange::new(mock, tight_policy(0), Cancel::new());
    let err = ex.send_command(&[0x40], 8, 100).unwrap_err();
    assert!(matches!(
        err,
        Error::BufferOverflow {
            needed: 32,
            capacity: 8
        }
    ));
}
