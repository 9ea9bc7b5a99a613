// Emulation walkthrough against a scripted transport.
//
// Scripts the whole target-side session the chip would relay from a
// live reader: activation, REQA, anticollision, one page read, HLTA.
//
// Usage:
//   RUST_LOG=debug cargo run -p typea --example mock_emulate

use typea::prelude::*;
use typea::test_support::{script_command, script_wake};
use typea::transport::MockTransport;

fn initiator_command(command: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x89, 0x00];
    payload.extend_from_slice(command);
    payload
}

fn main() -> Result<()> {
    env_logger::init();

    let mut mock = MockTransport::new();
    script_wake(&mut mock);
    // Register escape: three read-modify-writes
    for _ in 0..3 {
        script_command(&mut mock, &[0x07, 0x80]);
        script_command(&mut mock, &[0x09]);
    }
    script_command(&mut mock, &[0x13]); // SetParameters
    script_command(&mut mock, &[0x8D, 0x08]); // TgInitAsTarget: activated

    // The scripted reader walks the whole session
    script_command(&mut mock, &initiator_command(&[0x26])); // REQA
    script_command(&mut mock, &[0x91, 0x00]);
    script_command(&mut mock, &initiator_command(&[0x93, 0x20])); // SDD CL1
    script_command(&mut mock, &[0x91, 0x00]);
    script_command(&mut mock, &initiator_command(&[0x93, 0x70])); // SEL CL1
    script_command(&mut mock, &[0x91, 0x00]);
    script_command(&mut mock, &initiator_command(&[0x30, 0x04])); // read page 4
    script_command(&mut mock, &[0x91, 0x00]);
    script_command(&mut mock, &initiator_command(&[0x50, 0x00])); // HLTA

    let mut device = DeviceBuilder::new(mock).build_uninitialized().initialize()?;

    let mut image_bytes = vec![0u8; 64];
    image_bytes[16..32].copy_from_slice(b"hello from typea");
    let image = EmulationImage::new(&image_bytes);

    let state = device.emulate(Uid::Single([0xDE, 0xAD, 0xBE, 0xEF]), image)?;
    println!("session ended in state {state:?}");
    Ok(())
}
