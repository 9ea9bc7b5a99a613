// Polling walkthrough against a scripted transport.
//
// The crate leaves physical transport bring-up to the caller, so this
// example scripts the chip's answers onto a MockTransport instead. Swap
// in a real serial transport to talk to hardware.
//
// Usage:
//   RUST_LOG=trace cargo run -p typea --example mock_poll

use typea::prelude::*;
use typea::test_support::{script_command, script_wake};
use typea::transport::MockTransport;

fn main() -> Result<()> {
    env_logger::init();

    let mut mock = MockTransport::new();
    script_wake(&mut mock);
    // One Type A target: ATQA 00 44, SAK 00, 7-byte UID
    script_command(
        &mut mock,
        &[
            0x4B, 0x01, 0x01, 0x00, 0x44, 0x00, 0x07, 0x04, 0x13, 0x37, 0x21, 0x43, 0x65, 0x87,
        ],
    );
    // InDataExchange read of pages 4..8
    let mut read_resp = vec![0x41, 0x00];
    read_resp.extend_from_slice(b"typea example!!!");
    script_command(&mut mock, &read_resp);

    let mut device = DeviceBuilder::new(mock).build_uninitialized().initialize()?;
    println!("firmware: {}", bytes_to_hex_spaced(device.firmware()));

    match device.poll_for_uid(PollBaud::TypeA106, 1000)? {
        Some(identity) => {
            println!("card: uid={}", identity.uid.to_hex());
            println!(
                "      atqa={} sak={:#04x}",
                bytes_to_hex_spaced(identity.atqa.as_bytes()),
                identity.sak.as_u8()
            );

            let block = device.read_page(4, 1000)?;
            println!("pages 4..8: {}", bytes_to_hex_spaced(&block));
        }
        None => println!("polling cancelled"),
    }

    Ok(())
}
