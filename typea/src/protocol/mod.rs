// typea/src/protocol/mod.rs

//! Chip-protocol layer: link checksums, frame codec, CRC_A and the
//! byte-stream reassembler.

pub mod checksum;
pub mod crc;
pub mod frame;
pub mod reassembly;

pub use crc::{crc_a, crc_a_append, crc_a_verify};
pub use frame::{Frame, FrameKind};
pub use reassembly::Reassembler;
