// typea/src/prelude.rs

//! Single-import surface for typical use of the crate.

pub use crate::cancel::Cancel;
pub use crate::constants::SamMode;
pub use crate::device::{Device, DeviceBuilder, Initialized, RetryPolicy, Uninitialized};
pub use crate::device::{BusRegisters, ChipRegisters, RegisterAccess};
pub use crate::initiator::{Anticollision, ChipTransceive, Transceive};
pub use crate::target::{Responder, ResponderState};
pub use crate::transport::{RegisterBus, Transport};
pub use crate::{Atqa, CardIdentity, EmulationImage, PollBaud, Sak, TargetConfig, Uid};
pub use crate::{Error, Result};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
